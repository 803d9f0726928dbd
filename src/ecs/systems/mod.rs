mod events;
mod factors;
mod helpers;
mod population;
mod snapshot;
mod survey;

pub use events::{evaluate_event_stages, generate_pending_events, try_generate_event};
pub use factors::{attach_new_instance, daily_factor_drift, spawn_factors_in_region};
pub use population::daily_population;
pub use snapshot::snapshot_populations;
pub use survey::{frame_survey, raise_basement_level, set_base_area};

pub(crate) use helpers::unique_random_picks;
