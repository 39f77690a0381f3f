//! Endpoint table: logical resource names and their URL path templates.
//!
//! Templates use positional `{0}`, `{1}` placeholders. The table is the only
//! place names and paths are declared; [`Endpoint::from_name`] is the
//! name-based dispatch used for resources that are addressed by string.

use crate::JawboneError;
use std::fmt;
use std::str::FromStr;

macro_rules! endpoint_table {
    ($($variant:ident => $name:literal, $template:literal;)*) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Endpoint {
            $($variant,)*
        }

        impl Endpoint {
            pub const ALL: &'static [Endpoint] = &[$(Endpoint::$variant,)*];

            pub fn name(self) -> &'static str {
                match self {
                    $(Endpoint::$variant => $name,)*
                }
            }

            pub fn template(self) -> &'static str {
                match self {
                    $(Endpoint::$variant => $template,)*
                }
            }
        }
    };
}

endpoint_table! {
    // Users
    Me => "me", "/nudge/api/v.1.0/users/@me";
    Friends => "friends", "/nudge/api/v.1.0/users/@me/friends";
    // Mood
    MoodList => "mood_list", "/nudge/api/v.1.0/users/@me/mood";
    Mood => "mood", "/nudge/api/v.1.0/mood/{0}";
    // Trends
    Trends => "trends", "/nudge/api/v.1.0/users/@me/trends";
    // Moves
    MovesDate => "moves_date", "/nudge/api/v.1.0/users/@me/moves?date={0}";
    MovesList => "moves_list", "/nudge/api/v.1.0/users/@me/moves?start_time={0}&end_time={1}";
    Move => "move", "/nudge/api/v.1.0/moves/{0}";
    MoveImage => "move_image", "/nudge/api/v.1.0/moves/{0}/image";
    MoveSnapshot => "move_snapshot", "/nudge/api/v.1.0/moves/{0}/snapshot";
    // Workouts
    WorkoutsList => "workouts_list", "/nudge/api/v.1.0/users/@me/workouts?start_time={0}&end_time={1}";
    Workout => "workout", "/nudge/api/v.1.0/workouts/{0}";
    WorkoutImage => "workout_image", "/nudge/api/v.1.0/workouts/{0}/image";
    WorkoutSnapshot => "workout_snapshot", "/nudge/api/v.1.0/workouts/{0}/snapshot";
    // Sleeps
    SleepList => "sleep_list", "/nudge/api/v.1.0/users/@me/sleeps?start_time={0}&end_time={1}";
    Sleep => "sleep", "/nudge/api/v.1.0/sleeps/{0}";
    SleepImage => "sleep_image", "/nudge/api/v.1.0/sleeps/{0}/image";
    SleepSnapshot => "sleep_snapshot", "/nudge/api/v.1.0/sleeps/{0}/snapshot";
    // Meals
    MealsList => "meals_list", "/nudge/api/v.1.0/users/@me/meals?start_time={0}&end_time={1}";
    Meal => "meal", "/nudge/api/v.1.0/meals/{0}";
    // Body events
    BodyEventsList => "body_events_list", "/nudge/api/v.1.0/users/@me/body_events?start_time={0}&end_time={1}";
    BodyEvent => "body_event", "/nudge/api/v.1.0/body_events/{0}";
    // Cardiac events
    CardiacEventsList => "cardiac_events_list", "/nudge/api/v.1.0/users/@me/cardiac_events?start_time={0}&end_time={1}";
    CardiacEvent => "cardiac_event", "/nudge/api/v.1.0/cardiac_events/{0}";
}

impl Endpoint {
    /// Look up a logical resource name. Unknown names fail with
    /// [`JawboneError::Endpoint`].
    pub fn from_name(name: &str) -> Result<Self, JawboneError> {
        Self::ALL
            .iter()
            .copied()
            .find(|e| e.name() == name)
            .ok_or_else(|| JawboneError::Endpoint(name.to_string()))
    }

    /// Number of positional arguments the template expects.
    pub fn arity(self) -> usize {
        placeholders(self.template())
            .map(|(_, index)| index + 1)
            .max()
            .unwrap_or(0)
    }

    /// Substitute `args` into the template. The argument count must match
    /// [`Endpoint::arity`] exactly.
    pub fn format(self, args: &[&str]) -> Result<String, JawboneError> {
        let expected = self.arity();
        if args.len() != expected {
            return Err(JawboneError::Format {
                endpoint: self.name(),
                expected,
                got: args.len(),
            });
        }

        let template = self.template();
        let mut path = String::with_capacity(template.len() + args.iter().map(|a| a.len()).sum::<usize>());
        let mut cursor = 0;
        for (span, index) in placeholders(template) {
            path.push_str(&template[cursor..span.start]);
            path.push_str(args[index]);
            cursor = span.end;
        }
        path.push_str(&template[cursor..]);
        Ok(path)
    }
}

/// Yields the byte span and index of every `{N}` placeholder in `template`.
fn placeholders(template: &str) -> impl Iterator<Item = (std::ops::Range<usize>, usize)> + '_ {
    template.match_indices('{').filter_map(move |(open, _)| {
        let close = open + template[open..].find('}')?;
        let index = template[open + 1..close].parse::<usize>().ok()?;
        Some((open..close + 1, index))
    })
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = JawboneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
