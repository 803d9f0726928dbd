use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

use crate::model::Season;

/// Days per calendar month and months per year, matching the game calendar.
pub const DAYS_PER_MONTH: u64 = 30;
pub const MONTHS_PER_YEAR: u64 = 12;
pub const DAYS_PER_YEAR: u64 = DAYS_PER_MONTH * MONTHS_PER_YEAR;

/// Simulation clock resource.
///
/// `day` counts completed day ticks; `day_fraction` is partial progress into
/// the current day accumulated by frames. The `advance_day` system bumps the
/// day at the end of each day tick (in `SimPhase::Last`), so systems see the
/// day being simulated, not the next one.
#[derive(Resource, Debug, Clone)]
pub struct GameClock {
    pub day: u64,
    day_fraction: f64,
    pub seconds_per_day: f64,
    pub start_year: u32,
}

impl GameClock {
    pub fn new(start_year: u32, seconds_per_day: f64) -> Self {
        Self {
            day: 0,
            day_fraction: 0.0,
            seconds_per_day,
            start_year,
        }
    }

    /// Fold a frame's scaled wall time into the clock and return how many
    /// whole day boundaries it crossed. A time speed of zero models pause.
    /// The caller runs the day tick once per crossing; `day` itself only
    /// advances through those ticks.
    pub fn accumulate(&mut self, delta_time: f64, time_speed: f64) -> u32 {
        if self.seconds_per_day <= 0.0 {
            return 0;
        }
        self.day_fraction += delta_time * time_speed / self.seconds_per_day;
        let crossings = self.day_fraction.floor();
        self.day_fraction -= crossings;
        crossings as u32
    }

    /// Day of the month, 1-30.
    pub fn day_of_month(&self) -> u32 {
        (self.day % DAYS_PER_MONTH) as u32 + 1
    }

    /// Month of the year, 1-12.
    pub fn month(&self) -> u32 {
        ((self.day / DAYS_PER_MONTH) % MONTHS_PER_YEAR) as u32 + 1
    }

    pub fn year(&self) -> u32 {
        self.start_year + (self.day / DAYS_PER_YEAR) as u32
    }

    pub fn season(&self) -> Season {
        Season::from_month(self.month())
    }
}

/// Per-frame step parameters, written by the driver before each frame tick.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FrameStep {
    pub delta_time: f64,
    pub time_speed: f64,
}

impl Default for FrameStep {
    fn default() -> Self {
        Self {
            delta_time: 0.0,
            time_speed: 1.0,
        }
    }
}

/// Bevy system that advances the clock by one day.
/// Registered in `SimPhase::Last` of the day tick.
pub fn advance_day(mut clock: ResMut<GameClock>) {
    clock.day += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clock_starts_at_given_year() {
        let clock = GameClock::new(2021, 1.0);
        assert_eq!(clock.day, 0);
        assert_eq!(clock.day_of_month(), 1);
        assert_eq!(clock.month(), 1);
        assert_eq!(clock.year(), 2021);
        assert_eq!(clock.season(), Season::Winter);
    }

    #[test]
    fn calendar_rolls_over_month_and_year() {
        let mut clock = GameClock::new(2021, 1.0);
        clock.day = 29;
        assert_eq!(clock.day_of_month(), 30);
        assert_eq!(clock.month(), 1);
        clock.day = 30;
        assert_eq!(clock.day_of_month(), 1);
        assert_eq!(clock.month(), 2);
        clock.day = DAYS_PER_YEAR;
        assert_eq!(clock.year(), 2022);
        assert_eq!(clock.month(), 1);
    }

    #[test]
    fn season_follows_the_month() {
        let mut clock = GameClock::new(2021, 1.0);
        clock.day = DAYS_PER_MONTH * 3; // April
        assert_eq!(clock.season(), Season::Spring);
        clock.day = DAYS_PER_MONTH * 6; // July
        assert_eq!(clock.season(), Season::Summer);
        clock.day = DAYS_PER_MONTH * 11; // December
        assert_eq!(clock.season(), Season::Winter);
    }

    #[test]
    fn accumulate_counts_crossed_boundaries() {
        let mut clock = GameClock::new(2021, 1.0);
        assert_eq!(clock.accumulate(0.4, 1.0), 0);
        assert_eq!(clock.accumulate(0.4, 1.0), 0);
        // 0.8 + 0.4 crosses one boundary, 0.2 carries over
        assert_eq!(clock.accumulate(0.4, 1.0), 1);
        assert_eq!(clock.accumulate(0.7, 1.0), 0);
    }

    #[test]
    fn accumulate_scales_by_time_speed() {
        let mut clock = GameClock::new(2021, 2.0);
        // 0.5 s at 8x over a 2 s day crosses two boundaries
        assert_eq!(clock.accumulate(0.5, 8.0), 2);
    }

    #[test]
    fn paused_time_never_crosses() {
        let mut clock = GameClock::new(2021, 1.0);
        for _ in 0..100 {
            assert_eq!(clock.accumulate(10.0, 0.0), 0);
        }
    }
}
