use bevy_ecs::prelude::*;
use std::collections::VecDeque;
use std::f64::consts::PI;

/// Displacement of an undamped oscillator `time` seconds after release.
///
/// `mass` must be strictly positive, the parameter bounds guarantee it.
pub fn compute_displacement(initial_displacement: f64, mass: f64, stiffness: f64, time: f64) -> f64 {
    initial_displacement * ((stiffness / mass).sqrt() * time).cos()
}

/// Time of one full oscillation in seconds. `stiffness` must be positive.
pub fn compute_period(mass: f64, stiffness: f64) -> f64 {
    2.0 * PI * (mass / stiffness).sqrt()
}

/// Angular frequency for a given period.
pub fn compute_frequency(period: f64) -> f64 {
    2.0 * PI / period
}

pub fn advance_clock(current: u64, interval: u64) -> u64 {
    current + interval
}

/// Appends `value` and evicts the oldest samples until at most `max_len` remain.
pub fn append_sample(history: &mut VecDeque<f64>, value: f64, max_len: usize) {
    history.push_back(value);
    while history.len() > max_len {
        history.pop_front();
    }
}

/// Applies `delta` to `value` if the result stays in `[min, max]`, otherwise
/// leaves `value` untouched.
pub fn adjust_parameter(value: f64, delta: f64, min: f64, max: f64) -> f64 {
    let next = value + delta;
    if next < min || next > max {
        value
    } else {
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParameterBounds {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        ParameterBounds { min, max, step }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The three parameters the user can tweak, in selector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActiveParameter {
    Mass,
    Stiffness,
    InitialDisplacement,
}

impl ActiveParameter {
    pub const ALL: [ActiveParameter; 3] = [
        ActiveParameter::Mass,
        ActiveParameter::Stiffness,
        ActiveParameter::InitialDisplacement,
    ];

    fn index(self) -> usize {
        match self {
            ActiveParameter::Mass => 0,
            ActiveParameter::Stiffness => 1,
            ActiveParameter::InitialDisplacement => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            ActiveParameter::Mass => "mass",
            ActiveParameter::Stiffness => "stiffness",
            ActiveParameter::InitialDisplacement => "initial displacement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterLimits {
    pub mass: ParameterBounds,
    pub stiffness: ParameterBounds,
    pub initial_displacement: ParameterBounds,
}

impl ParameterLimits {
    pub fn get(&self, parameter: ActiveParameter) -> &ParameterBounds {
        match parameter {
            ActiveParameter::Mass => &self.mass,
            ActiveParameter::Stiffness => &self.stiffness,
            ActiveParameter::InitialDisplacement => &self.initial_displacement,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorParameters {
    pub mass: f64,
    pub stiffness: f64,
    pub initial_displacement: f64,
}

impl OscillatorParameters {
    pub fn get(&self, parameter: ActiveParameter) -> f64 {
        match parameter {
            ActiveParameter::Mass => self.mass,
            ActiveParameter::Stiffness => self.stiffness,
            ActiveParameter::InitialDisplacement => self.initial_displacement,
        }
    }

    fn get_mut(&mut self, parameter: ActiveParameter) -> &mut f64 {
        match parameter {
            ActiveParameter::Mass => &mut self.mass,
            ActiveParameter::Stiffness => &mut self.stiffness,
            ActiveParameter::InitialDisplacement => &mut self.initial_displacement,
        }
    }

    pub fn displacement_at(&self, seconds: f64) -> f64 {
        compute_displacement(self.initial_displacement, self.mass, self.stiffness, seconds)
    }

    pub fn period(&self) -> f64 {
        compute_period(self.mass, self.stiffness)
    }

    pub fn frequency(&self) -> f64 {
        compute_frequency(self.period())
    }
}

/// Simulated time in milliseconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SimulationClock {
    pub elapsed_ms: u64,
}

impl SimulationClock {
    pub fn advance(&mut self, interval_ms: u64) {
        self.elapsed_ms = advance_clock(self.elapsed_ms, interval_ms);
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }

    pub fn seconds(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }
}

/// Most recent displacement samples, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementHistory {
    samples: VecDeque<f64>,
    max_len: usize,
}

impl DisplacementHistory {
    pub fn with_capacity(max_len: usize) -> Self {
        DisplacementHistory {
            samples: VecDeque::with_capacity(max_len + 1),
            max_len,
        }
    }

    pub fn push(&mut self, value: f64) {
        append_sample(&mut self.samples, value, self.max_len);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

/// Everything the oscillator needs between frames. Lives as a single resource.
#[derive(Debug, Clone)]
pub struct OscillatorState {
    parameters: OscillatorParameters,
    limits: ParameterLimits,
    clock: SimulationClock,
    history: DisplacementHistory,
    active: ActiveParameter,
    tick_interval_ms: u64,
}

impl OscillatorState {
    pub fn new(
        parameters: OscillatorParameters,
        limits: ParameterLimits,
        tick_interval_ms: u64,
        history_len: usize,
    ) -> Self {
        OscillatorState {
            parameters,
            limits,
            clock: SimulationClock::default(),
            history: DisplacementHistory::with_capacity(history_len),
            active: ActiveParameter::Mass,
            tick_interval_ms,
        }
    }

    pub fn parameters(&self) -> &OscillatorParameters {
        &self.parameters
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn history(&self) -> &DisplacementHistory {
        &self.history
    }

    pub fn active(&self) -> ActiveParameter {
        self.active
    }

    /// Displacement at the current clock reading.
    pub fn displacement(&self) -> f64 {
        self.parameters.displacement_at(self.clock.seconds())
    }

    /// Displacement the body should be drawn at: the last sampled one, or the
    /// release position right after a reset.
    pub fn current_displacement(&self) -> f64 {
        self.history.latest().unwrap_or_else(|| self.displacement())
    }

    /// Samples the displacement, records it and moves the clock one interval.
    pub fn tick(&mut self) -> f64 {
        let displacement = self.displacement();
        self.history.push(displacement);
        self.clock.advance(self.tick_interval_ms);
        displacement
    }

    pub fn restart(&mut self) {
        self.clock.reset();
        self.history.clear();
    }

    pub fn select(&mut self, parameter: ActiveParameter) {
        self.active = parameter;
    }

    pub fn select_next(&mut self) {
        self.active = self.active.next();
    }

    pub fn select_previous(&mut self) {
        self.active = self.active.previous();
    }

    pub fn increase(&mut self) -> bool {
        self.adjust(1.0)
    }

    pub fn decrease(&mut self) -> bool {
        self.adjust(-1.0)
    }

    /// Moves the active parameter one step in `direction`. Returns whether the
    /// value changed; a change restarts the motion from the release point.
    fn adjust(&mut self, direction: f64) -> bool {
        let bounds = *self.limits.get(self.active);
        let value = self.parameters.get_mut(self.active);
        let next = adjust_parameter(*value, direction * bounds.step, bounds.min, bounds.max);
        if next == *value {
            return false;
        }
        *value = next;
        self.restart();
        true
    }
}

pub fn physics_update(mut state: ResMut<OscillatorState>) {
    state.tick();
}
