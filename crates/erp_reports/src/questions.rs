//! The five reporting questions.
//!
//! Every question runs on a single borrowed connection and returns its
//! answer as text. Amounts stay `numeric` end to end and a null sum counts
//! as zero.

use crate::ReportResult;
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use std::io::Write;

/// Share of the outstanding 2011 balance assumed to be collected in the
/// second projection.
pub const COLLECTED_SHARE: Decimal = Decimal::from_parts(35, 0, 0, false, 2);

const UNASSIGNED: &str = "unassigned";

const TOTAL_PLANNED: &str = "select sum(amount_total) \
     from sale_order \
     where state != 'draft'";

const TOTAL_PER_USER: &str = "select t2.name, sum(t1.amount_total) \
     from sale_order as t1 left join res_users as t2 on t1.user_id = t2.id \
     where t1.state != 'draft' \
     group by t2.name";

const TOP_CLIENTS: &str = "select a2.name, sum(a1.amount_total) as total \
     from sale_order as a1 join res_partner as a2 on a1.partner_id = a2.id \
     group by a2.name \
     order by total desc \
     limit 3";

const PAID_ORDERS: &str = "select t4.name, t1.amount_total \
     from sale_order as t1 \
     join sale_order_invoice_rel as t2 on t1.id = t2.order_id \
     join res_partner as t4 on t1.partner_id = t4.id \
     where t2.invoice_id in (select t3.id from account_invoice as t3 where t3.state = 'paid') \
     order by t1.amount_total desc";

const PAID_2011: &str = "select sum(amount_total) \
     from account_invoice \
     where date_invoice >= '2011-01-01' and date_invoice <= '2011-12-31' \
     and state = 'paid'";

const PENDING_2011: &str = "select sum(amount_total) \
     from account_invoice \
     where date_invoice >= '2011-01-01' and date_invoice <= '2011-12-31' \
     and not state in ('draft', 'paid')";

/// Rows for which an aggregate matched nothing come back as SQL null.
fn or_zero(amount: Option<Decimal>) -> Decimal {
    amount.unwrap_or(Decimal::ZERO)
}

fn render_total(total: Option<Decimal>) -> String {
    format!("Total amount: {}", or_zero(total))
}

fn render_rows(rows: Vec<(Option<String>, Option<Decimal>)>) -> String {
    rows.into_iter()
        .map(|(name, amount)| {
            format!(
                "{} -> {}",
                name.as_deref().unwrap_or(UNASSIGNED),
                or_zero(amount)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

async fn named_sums(conn: &mut PgConnection, sql: &str) -> ReportResult<String> {
    let rows: Vec<(Option<String>, Option<Decimal>)> =
        sqlx::query_as(sql).fetch_all(&mut *conn).await?;
    tracing::debug!(rows = rows.len(), "query returned");
    Ok(render_rows(rows))
}

async fn sum(conn: &mut PgConnection, sql: &str) -> ReportResult<Option<Decimal>> {
    Ok(sqlx::query_scalar(sql).fetch_one(&mut *conn).await?)
}

pub async fn question1(conn: &mut PgConnection) -> ReportResult<String> {
    let total = sum(conn, TOTAL_PLANNED).await?;
    Ok(render_total(total))
}

pub async fn question2(conn: &mut PgConnection) -> ReportResult<String> {
    named_sums(conn, TOTAL_PER_USER).await
}

pub async fn question3(conn: &mut PgConnection) -> ReportResult<String> {
    named_sums(conn, TOP_CLIENTS).await
}

pub async fn question4(conn: &mut PgConnection) -> ReportResult<String> {
    named_sums(conn, PAID_ORDERS).await
}

pub async fn question5(conn: &mut PgConnection) -> ReportResult<String> {
    let paid = sum(conn, PAID_2011).await?;
    let pending = sum(conn, PENDING_2011).await?;
    Ok(ProfitProjection::from_sums(paid, pending).render())
}

/// 2011 profit if outstanding invoices are written off (`written_off`) or
/// partly collected (`partly_collected`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfitProjection {
    pub written_off: Decimal,
    pub partly_collected: Decimal,
}

impl ProfitProjection {
    pub fn from_sums(paid: Option<Decimal>, pending: Option<Decimal>) -> Self {
        let paid = or_zero(paid);
        let pending = or_zero(pending);
        Self {
            written_off: paid - pending,
            partly_collected: paid + pending * COLLECTED_SHARE,
        }
    }

    pub fn render(&self) -> String {
        format!("#1: {}\n#2: {:.2}", self.written_off, self.partly_collected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    TotalPlanned,
    TotalPerUser,
    TopClients,
    PaidOrders,
    Profit2011,
}

impl Question {
    pub const ALL: [Question; 5] = [
        Question::TotalPlanned,
        Question::TotalPerUser,
        Question::TopClients,
        Question::PaidOrders,
        Question::Profit2011,
    ];

    pub fn number(self) -> usize {
        match self {
            Question::TotalPlanned => 1,
            Question::TotalPerUser => 2,
            Question::TopClients => 3,
            Question::PaidOrders => 4,
            Question::Profit2011 => 5,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Question::TotalPlanned => {
                "What is the total amount of money for the goods which are planned to be sold?"
            }
            Question::TotalPerUser => {
                "What is the total amount of money for the sale orders which was made by each \
                 system user? (except sale_order entries with state \"draft\")"
            }
            Question::TopClients => {
                "Top 3 company clients which made the biggest total amount for the sale orders?"
            }
            Question::PaidOrders => {
                "Which sales orders associated with the account are fully paid up and which one \
                 of them is the biggest one?"
            }
            Question::Profit2011 => {
                "What will be the company's \"profit\" in 2011:\n\
                 if the outstanding balances of account will be written off to losses;\n\
                 if the outstanding balances of account will be paid 35% and the rest part \
                 will be written off to losses"
            }
        }
    }

    pub async fn run(self, conn: &mut PgConnection) -> ReportResult<String> {
        tracing::debug!(question = self.number(), "running");
        match self {
            Question::TotalPlanned => question1(conn).await,
            Question::TotalPerUser => question2(conn).await,
            Question::TopClients => question3(conn).await,
            Question::PaidOrders => question4(conn).await,
            Question::Profit2011 => question5(conn).await,
        }
    }
}

/// Answer every question in order, one pooled connection per question.
pub async fn run_all<W: Write>(pool: &PgPool, out: &mut W) -> ReportResult<()> {
    for question in Question::ALL {
        writeln!(out, "Question {}:", question.number())?;
        writeln!(out, "{}", question.description())?;
        let answer = {
            let mut conn = pool.acquire().await?;
            question.run(&mut conn).await?
        };
        writeln!(out, "{answer}")?;
        writeln!(out, "{}", "=".repeat(20))?;
    }
    Ok(())
}
