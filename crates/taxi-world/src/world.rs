//! `World`: the simulated city — taxis, in-flight passenger groups, and the
//! dispatch loop that matches one to the other, one tick at a time.

use std::collections::{HashMap, VecDeque};

use taxi_core::{GroupId, Parameters, Request, SimTime, TaxiId};
use taxi_fleet::{PassengerGroup, Status, Taxi};
use taxi_region::ManhattanRegion;

use crate::dispatch::{get_zone_candidate_no_rs, get_zone_candidate_rs};
use crate::group_ids::GroupIdGen;
use crate::metrics::Metrics;
use crate::outcome::DispatchOutcome;
use crate::zone_index::ZoneIndex;

/// The simulated city for one run: a fleet of taxis, the region they operate
/// in, and every passenger group currently somewhere in its lifecycle.
///
/// `World` owns every [`PassengerGroup`] directly in a `HashMap`, rather
/// than taxis or tasks holding shared references to them — a task only ever
/// carries a [`GroupId`], and resolving it back to the group's route and
/// timestamps always goes through `World::groups`. That keeps the aliasing
/// rules trivial: nothing here reaches for `Rc<RefCell<_>>`.
///
/// Every `GroupId` this struct stores — the `HashMap` key, the queues below,
/// and every `Task::group_id` a taxi carries — is a group's `entry_id`, not
/// its `group_id`: a split group's two halves share one `group_id` but get
/// distinct `entry_id`s, since the same taxi can end up holding pickup or
/// dropoff tasks for both of them.
pub struct World {
    pub time: SimTime,
    pub sharing: bool,
    pub taxis: Vec<Taxi>,
    pub zones: ZoneIndex,
    pub groups: HashMap<GroupId, PassengerGroup>,
    pub request_queue: VecDeque<Request>,
    pub dispatch_queue: VecDeque<GroupId>,
    pub pickup_list: Vec<GroupId>,
    pub metrics: Metrics,
    pub region: ManhattanRegion,
    pub params: Parameters,
    group_ids: GroupIdGen,
}

impl World {
    pub fn new(region: ManhattanRegion, params: Parameters, sharing: bool, start_time: SimTime) -> Self {
        Self {
            time: start_time,
            sharing,
            taxis: Vec::new(),
            zones: ZoneIndex::new(),
            groups: HashMap::new(),
            request_queue: VecDeque::new(),
            dispatch_queue: VecDeque::new(),
            pickup_list: Vec::new(),
            metrics: Metrics::new(),
            region,
            params,
            group_ids: GroupIdGen::new(),
        }
    }

    pub fn add_taxi(&mut self, taxi: Taxi) {
        self.zones.insert(taxi.zone(), taxi.id);
        self.taxis.push(taxi);
    }

    pub fn add_taxis(&mut self, taxis: impl IntoIterator<Item = Taxi>) {
        for taxi in taxis {
            self.add_taxi(taxi);
        }
    }

    pub fn add_request(&mut self, request: Request) {
        self.request_queue.push_back(request);
    }

    pub fn add_requests(&mut self, requests: impl IntoIterator<Item = Request>) {
        self.request_queue.extend(requests);
    }

    /// Move every request whose `request_time` has arrived from
    /// `request_queue` into a freshly minted [`PassengerGroup`] on the
    /// dispatch queue.
    fn load_requests(&mut self) {
        while let Some(req) = self.request_queue.front() {
            if req.request_time > self.time {
                break;
            }
            let req = self.request_queue.pop_front().expect("front just checked Some");
            let id = self.group_ids.next();
            let group = PassengerGroup::new(id, req.size, req.src, req.dst, req.request_time);
            self.groups.insert(id, group);
            self.dispatch_queue.push_back(id);
            self.metrics.record_request();
        }
    }

    /// Try to match every group waiting in `dispatch_queue` to a taxi,
    /// oldest request first. A group that cannot be matched and has not yet
    /// timed out or grown stale enough to split stays at the front of the
    /// queue for the next tick.
    ///
    /// Consecutive entries sharing a `group_id` (the two halves of a split,
    /// which [`World::split_group`] always queues back-to-back) get a
    /// shortcut: if the immediately preceding entry bound a taxi with room
    /// left for this one too, it's reused directly rather than re-running
    /// the zone search.
    fn dispatch_taxis(&mut self) {
        let mut remaining = VecDeque::with_capacity(self.dispatch_queue.len());
        let mut last_taxi: Option<TaxiId> = None;
        let mut last_group_id: Option<GroupId> = None;

        while let Some(entry_id) = self.dispatch_queue.pop_front() {
            let group = *self.groups.get(&entry_id).expect("queued group id must exist");

            if self.time.since_secs(group.request_time) >= self.params.timeout_secs() {
                self.metrics.record_timeout(group.request_time, self.time);
                self.groups.remove(&entry_id);
                continue;
            }

            let reused = last_taxi.filter(|&taxi_id| {
                last_group_id == Some(group.group_id) && self.has_room(taxi_id, group.size)
            });

            let candidate = reused.or_else(|| {
                if self.sharing {
                    get_zone_candidate_rs(&self.taxis, &self.zones, &group, &self.params)
                } else {
                    get_zone_candidate_no_rs(&self.taxis, &self.zones, &group, &self.params)
                }
            });

            last_taxi = candidate;

            match candidate {
                Some(taxi_id) => {
                    self.assign(taxi_id, entry_id);
                    last_group_id = Some(group.group_id);
                }
                None => {
                    if self.should_split(&group) {
                        self.split_group(entry_id, &mut remaining);
                    } else {
                        remaining.push_back(entry_id);
                    }
                }
            }
        }

        self.dispatch_queue = remaining;
    }

    /// Whether `taxi_id` has at least `extra` seats of spare capacity beyond
    /// what it's already carrying or committed to pick up.
    fn has_room(&self, taxi_id: TaxiId, extra: u32) -> bool {
        let taxi = &self.taxis[taxi_id.index()];
        let committed = taxi.num_passengers + taxi.num_pending_pickups;
        taxi.capacity() >= committed + extra
    }

    /// A group splits once it is both at or above `split_size` riders and
    /// has waited at least `split_time` — either alone lets it keep waiting
    /// for a taxi large enough to take it whole.
    fn should_split(&self, group: &PassengerGroup) -> bool {
        group.size >= self.params.split_size
            && self.time.since_secs(group.request_time) >= self.params.split_time_secs()
    }

    /// Split `entry_id`'s group in half, sharing its `group_id` across both
    /// halves, and queue the new sibling immediately ahead of the original
    /// so the two stay adjacent for the group-reuse shortcut above.
    fn split_group(&mut self, entry_id: GroupId, queue: &mut VecDeque<GroupId>) {
        let size = self.groups.get(&entry_id).expect("split target must exist").size;
        let split_off = size / 2;

        let new_entry_id = self.group_ids.next();
        let sibling = {
            let group = self.groups.get_mut(&entry_id).expect("split target must exist");
            group.split(split_off, new_entry_id)
        };
        self.groups.insert(new_entry_id, sibling);
        self.metrics.record_request();
        queue.push_back(new_entry_id);
        queue.push_back(entry_id);
    }

    fn assign(&mut self, taxi_id: TaxiId, entry_id: GroupId) {
        let group = self.groups.get_mut(&entry_id).expect("assigned group must exist");
        group.dispatch_time = Some(self.time);
        let group = *group;
        self.taxis[taxi_id.index()].add_pickup_task(&group);
        self.pickup_list.push(entry_id);
    }

    /// Apply the pickup/dropoff/zone-change events a taxi's `tick` reported,
    /// folding them into the shared zone index, group table, and metrics.
    fn apply_events(&mut self, taxi_id: TaxiId, events: taxi_fleet::TickEvents) {
        if let Some((old_zone, new_zone)) = events.zone_change {
            self.zones.relocate(taxi_id, old_zone, new_zone);
        }

        if let Some((entry_id, _)) = events.pickup {
            let group = self.groups.get_mut(&entry_id).expect("picked-up group must exist");
            group.pickup_time = Some(self.time);
            let group = *group;
            self.taxis[taxi_id.index()].confirm_pickup(&group);
            self.pickup_list.retain(|&id| id != entry_id);
        }

        if let Some((entry_id, _)) = events.dropoff {
            let group = self.groups.get_mut(&entry_id).expect("dropped-off group must exist");
            group.dropoff_time = Some(self.time);
            let group = *group;
            self.taxis[taxi_id.index()].confirm_dropoff(&group);
            self.metrics.record_dropoff(DispatchOutcome::from_completed_group(&group));
            self.groups.remove(&entry_id);
        }
    }

    /// Advance the simulation by one `Parameters::tick_time`-second step:
    /// move every taxi, resolve whatever pickups/dropoffs/zone changes
    /// resulted, admit newly arrived requests, then try to dispatch.
    pub fn tick(&mut self) {
        self.time = self.time.advance(self.params.tick_time);

        for i in 0..self.taxis.len() {
            let taxi_id = self.taxis[i].id;
            let events = self.taxis[i].tick(&self.region, &self.params);
            self.apply_events(taxi_id, events);
        }

        self.load_requests();
        self.dispatch_taxis();
    }

    /// Whether every admitted request has either been dropped off or timed
    /// out, with nothing left waiting in `request_queue`.
    pub fn is_done(&self) -> bool {
        self.request_queue.is_empty()
            && self.dispatch_queue.is_empty()
            && self.metrics.num_requests == self.metrics.num_dropoffs + self.metrics.num_timeouts
    }

    /// Tick until [`World::is_done`], or `max_ticks` is reached if given.
    pub fn run(&mut self, max_ticks: Option<u64>) {
        let mut ticks = 0;
        while !self.is_done() {
            self.tick();
            ticks += 1;
            if max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }
        }
    }

    /// Clear every taxi's tasks and per-episode reward accumulator, leaving
    /// position, capacity, and learning state untouched — the starting
    /// point for the next training episode or simulated day.
    pub fn reset_taxis(&mut self) {
        for taxi in &mut self.taxis {
            taxi.tasks.clear();
            taxi.status = Status::Idle;
            taxi.num_passengers = 0;
            taxi.num_pending_pickups = 0;
            taxi.reset_metrics();
        }
    }

    /// Clear every in-flight group and counter, ready for a fresh run over
    /// the same fleet.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
        self.groups.clear();
        self.dispatch_queue.clear();
        self.pickup_list.clear();
        self.group_ids = GroupIdGen::new();
    }
}
