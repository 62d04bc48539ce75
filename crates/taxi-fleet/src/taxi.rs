//! The per-taxi state machine: motion, task handling, and the Q-learning
//! seating-capacity policy.

use std::collections::VecDeque;

use taxi_core::{Parameters, Position, TaxiId, TaxiRng, Zone};
use taxi_region::ManhattanRegion;

use crate::group::PassengerGroup;
use crate::learn::{QTable, STable};
use crate::task::{Choice, Status, Task, TaskKind};

/// Events a `Taxi::tick` call produced, for `taxi-world` to fold into the
/// shared zone index, group table, and metrics. Keeping these as plain data
/// instead of handing `Taxi::tick` a fistful of `&mut` references to shared
/// state sidesteps the aliasing problem entirely — the same shape
/// `taxi-world`'s dispatch loop later uses to report completed rides.
#[derive(Clone, Debug, Default)]
pub struct TickEvents {
    /// `(group_id, riders_picked_up)` if a pickup task completed this tick.
    pub pickup: Option<(taxi_core::GroupId, u32)>,
    /// `(group_id, riders_dropped_off)` if a dropoff task completed this tick.
    pub dropoff: Option<(taxi_core::GroupId, u32)>,
    /// `(old_zone, new_zone)` if the taxi crossed a zone boundary this tick.
    pub zone_change: Option<(Zone, Zone)>,
}

/// Optional per-tick position/pickup/dropoff trace, used by `taxi-cli`'s
/// `--save-paths` option. Off by default — carrying it costs a `Vec` push
/// per tick per taxi, which matters at fleet scale.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathLog {
    pub positions: Vec<Position>,
    pub pickups: Vec<Position>,
    pub dropoffs: Vec<Position>,
}

/// A single taxi: its position, task queue, and the learning state driving
/// its seating-capacity decisions.
#[derive(Clone, Debug)]
pub struct Taxi {
    pub id: TaxiId,
    pub position: Position,
    /// Current seating capacity. Adjusted once per episode by
    /// [`Taxi::choose_action`], never mid-episode.
    pub size: u32,
    pub status: Status,
    pub tasks: VecDeque<Task>,
    pub num_passengers: u32,
    pub num_pending_pickups: u32,
    pub q_table: QTable,
    pub s_table: STable,
    /// Probability of exploring (picking a uniformly random action) instead
    /// of exploiting the current Q-table argmax.
    pub p_explore: f64,
    pub rng: TaxiRng,
    /// The seed `rng` was derived from. `TaxiRng` wraps a `SmallRng` with no
    /// serde support of its own, so a fleet snapshot (`taxi-output`) stores
    /// this instead and re-derives a fresh, equally-deterministic `TaxiRng`
    /// on load rather than trying to serialize generator state directly.
    seed: u64,

    episode_weighted_distance: f64,
    pending_choice: Option<(Choice, u32)>,
    pub path_log: Option<PathLog>,
}

impl Taxi {
    pub fn new(id: TaxiId, position: Position, size: u32, maxsize: u32, seed: u64) -> Self {
        Self {
            id,
            position,
            size,
            status: Status::Idle,
            tasks: VecDeque::new(),
            num_passengers: 0,
            num_pending_pickups: 0,
            q_table: QTable::new(maxsize),
            s_table: STable::new(),
            p_explore: 1.0,
            rng: TaxiRng::new(seed, id),
            seed,
            episode_weighted_distance: 0.0,
            pending_choice: None,
            path_log: None,
        }
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Enable path logging for this taxi (used by `run-day --save-paths`).
    pub fn with_path_log(mut self) -> Self {
        self.path_log = Some(PathLog::default());
        self
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn zone(&self) -> Zone {
        self.position.zone()
    }

    /// The task the taxi is currently travelling toward, if any.
    pub fn destination(&self) -> Option<Position> {
        self.tasks.front().map(|t| t.target)
    }

    /// Every queued stop, in visit order.
    pub fn destinations(&self) -> impl Iterator<Item = Position> + '_ {
        self.tasks.iter().map(|t| t.target)
    }

    /// Accumulated reward for the current episode: the seat-weighted
    /// distance travelled while carrying passengers, which rewards running
    /// closer to full capacity over running half-empty.
    #[inline]
    pub fn reward(&self) -> f64 {
        self.episode_weighted_distance
    }

    pub fn append_task(&mut self, task: Task) {
        self.tasks.push_back(task);
    }

    pub fn prepend_task(&mut self, task: Task) {
        self.tasks.push_front(task);
    }

    /// Queue a pickup for `group`, jumping the line ahead of everything
    /// else. If the taxi was mid-reposition, that task is abandoned —
    /// rebalancing loses to an actual fare every time.
    pub fn add_pickup_task(&mut self, group: &PassengerGroup) {
        if self.status == Status::Repositioning {
            self.tasks.pop_front();
        }
        self.prepend_task(Task::pickup(group.src, group.entry_id));
        self.num_pending_pickups += group.size;
        self.status = Status::Pickup;
    }

    pub fn reset_metrics(&mut self) {
        self.episode_weighted_distance = 0.0;
    }

    /// Advance the taxi by one tick: roll for repositioning if idle, move
    /// toward the head task's target, and report any lifecycle events that
    /// resulted.
    pub fn tick(&mut self, region: &ManhattanRegion, params: &Parameters) -> TickEvents {
        let mut events = TickEvents::default();
        let zone_before = self.zone();

        if self.tasks.is_empty() && self.status != Status::Repositioning {
            if self.rng.gen_bool(params.repo_prob()) {
                let target = region.get_rand_pos(&mut self.rng);
                self.append_task(Task::reposition(target));
                self.status = Status::Repositioning;
            }
        }

        if let Some(task) = self.tasks.front().copied() {
            let remaining = self.position.distance(task.target);
            let tick_dist = params.tick_dist_m();
            let weight = weighted_distance_factor(self.num_passengers, self.size);

            if remaining <= tick_dist {
                self.episode_weighted_distance += remaining * weight;
                self.position = task.target;
                self.complete_task(task, &mut events);
            } else {
                self.position = self.position.interpolate_toward(task.target, tick_dist);
                self.episode_weighted_distance += tick_dist * weight;
            }

            if let Some(log) = &mut self.path_log {
                log.positions.push(self.position);
            }
        }

        self.status = self.status_for_head_task();

        let zone_after = self.zone();
        if zone_after != zone_before {
            events.zone_change = Some((zone_before, zone_after));
        }
        events
    }

    fn complete_task(&mut self, task: Task, events: &mut TickEvents) {
        self.tasks.pop_front();
        match task.kind {
            TaskKind::Pickup => {
                let group_id = task.group_id.expect("pickup task always carries a group id");
                if let Some(log) = &mut self.path_log {
                    log.pickups.push(task.target);
                }
                // The riders picked up here is reported by the caller once it
                // looks up the group's remaining size; we report 0 and let
                // `taxi-world` fill in the rider count from its own group
                // table, which is the single source of truth for group size.
                events.pickup = Some((group_id, 0));
            }
            TaskKind::Dropoff => {
                let group_id = task.group_id.expect("dropoff task always carries a group id");
                if let Some(log) = &mut self.path_log {
                    log.dropoffs.push(task.target);
                }
                events.dropoff = Some((group_id, 0));
            }
            TaskKind::Reposition => {}
        }
    }

    fn status_for_head_task(&self) -> Status {
        match self.tasks.front() {
            None => Status::Idle,
            Some(task) => match task.kind {
                TaskKind::Pickup => Status::Pickup,
                TaskKind::Dropoff => Status::Dropoff,
                TaskKind::Reposition => Status::Repositioning,
            },
        }
    }

    /// Called by `taxi-world` once a pickup task's group has been resolved,
    /// to fold the actual rider count into `num_passengers`/
    /// `num_pending_pickups` and enqueue the matching dropoff.
    pub fn confirm_pickup(&mut self, group: &PassengerGroup) {
        self.num_passengers += group.size;
        self.num_pending_pickups = self.num_pending_pickups.saturating_sub(group.size);
        self.append_task(Task::dropoff(group.dst, group.entry_id));
    }

    /// Called by `taxi-world` once a dropoff task's group has been resolved.
    pub fn confirm_dropoff(&mut self, group: &PassengerGroup) {
        self.num_passengers = self.num_passengers.saturating_sub(group.size);
    }

    /// Epsilon-greedy selection of the next episode's seating capacity.
    /// Valid actions are restricted at the boundaries: capacity 1 cannot
    /// decrease, `maxsize` cannot increase.
    pub fn choose_action(&mut self) {
        let maxsize = self.q_table.maxsize();
        let valid: Vec<Choice> = Choice::ALL
            .into_iter()
            .filter(|c| match c {
                Choice::Decrease => self.size > 1,
                Choice::Increase => self.size < maxsize,
                Choice::Hold => true,
            })
            .collect();

        let explore = self.rng.gen_bool(self.p_explore);
        let choice = if explore {
            let idx = self.rng.gen_range(0..valid.len());
            valid[idx]
        } else {
            let q = self.q_table.get(self.size);
            let scores: Vec<f64> = valid.iter().map(|c| q[c.index()]).collect();
            let best = self.rng.argmax_tie_break(&scores);
            valid[best]
        };

        let old_size = self.size;
        self.size = (self.size as i32 + choice.delta()).clamp(1, maxsize as i32) as u32;
        self.pending_choice = Some((choice, old_size));
    }

    /// Bellman-update the Q-value for the action taken at the start of the
    /// episode, now that its reward is known.
    pub fn update_q_table(&mut self, gamma: f64, alpha: f64) {
        let Some((choice, old_size)) = self.pending_choice else {
            return;
        };
        let reward = self.reward();
        let best_next = self
            .q_table
            .peek(self.size)
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);

        let q = self.q_table.get(old_size);
        let old_value = q[choice.index()];
        let new_value = old_value + alpha * (reward + gamma * best_next - old_value);
        self.q_table.set(old_size, choice.index(), new_value);
    }

    /// Fold this episode's reward into the diagnostic Monte-Carlo baseline.
    pub fn update_s_table(&mut self) {
        let reward = self.reward();
        self.s_table.update(self.size, reward);
    }
}

/// `dist * num_passengers * (num_passengers / size)` — rewards carrying more
/// passengers relative to capacity more than just carrying more passengers,
/// so a Q-learner that only ever grows capacity doesn't look optimal.
fn weighted_distance_factor(num_passengers: u32, size: u32) -> f64 {
    if size == 0 {
        return 0.0;
    }
    num_passengers as f64 * (num_passengers as f64 / size as f64)
}
