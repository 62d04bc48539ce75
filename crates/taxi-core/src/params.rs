//! Simulation parameters — tunable constants controlling taxi motion,
//! dispatch, and the reward model.
//!
//! All fields are `pub` and independently overridable; [`Parameters::default`]
//! reproduces the simulator's reference configuration.

/// Fixed-but-overridable simulation constants.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameters {
    /// Seconds simulated per tick.
    pub tick_time: f64,
    /// Taxi cruising speed, in metres per second.
    pub taxi_speed: f64,
    /// Minutes a request may wait in the dispatch queue before it times out.
    pub timeout: f64,
    /// Mean minutes between an idle taxi's repositioning rolls.
    pub mean_repo_time: f64,
    /// Multiplier applied to a shared ride's allowed detour distance when
    /// searching for a candidate taxi.
    pub rideshare_multiplier: f64,
    /// Radius, in tick-distances, inside which a candidate taxi is
    /// dispatched immediately rather than compared against other candidates.
    pub instant_dispatch_radius: f64,
    /// Passenger-group size at or above which a group becomes eligible to
    /// split, once it has also waited `split_time`.
    pub split_size: u32,
    /// Minutes a group at or above `split_size` must wait, unmatched,
    /// before it is actually split.
    pub split_time: f64,
    /// Q-learning step size.
    pub alpha: f64,
    /// Q-learning discount factor.
    pub gamma: f64,
    /// Maximum taxi seating capacity.
    pub maxsize: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            tick_time: 60.0,
            taxi_speed: 3.3571,
            timeout: 10.0,
            mean_repo_time: 10.0,
            rideshare_multiplier: 1.1,
            instant_dispatch_radius: 1.0,
            split_size: 4,
            split_time: 5.0,
            alpha: 0.25,
            gamma: 0.9,
            maxsize: 16,
        }
    }
}

impl Parameters {
    /// Metres a taxi travels in a single tick at `taxi_speed`.
    #[inline]
    pub fn tick_dist_m(&self) -> f64 {
        self.taxi_speed * self.tick_time
    }

    /// Distance, in metres, within which the nearest-taxi search dispatches
    /// the first candidate it finds instead of comparing distances further.
    #[inline]
    pub fn instant_dispatch_range_m(&self) -> f64 {
        self.instant_dispatch_radius * self.tick_dist_m()
    }

    /// Per-tick probability that an idle taxi rolls to reposition, derived
    /// so the expected number of ticks between rolls is `mean_repo_time`
    /// minutes.
    #[inline]
    pub fn repo_prob(&self) -> f64 {
        self.tick_time / (self.mean_repo_time * 60.0)
    }

    /// `timeout`, in seconds.
    #[inline]
    pub fn timeout_secs(&self) -> f64 {
        self.timeout * 60.0
    }

    /// `split_time`, in seconds.
    #[inline]
    pub fn split_time_secs(&self) -> f64 {
        self.split_time * 60.0
    }
}
