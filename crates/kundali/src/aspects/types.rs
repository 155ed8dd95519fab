use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Houses counted from the aspecting body, expressed as forward sign
/// distances (the 7th house is distance 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrishtiRule {
    pub body: Body,
    pub sign_distances: &'static [usize],
}

/// One body casting drishti on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectPair {
    pub from: Body,
    pub to: Body,
    /// Forward sign distance, 0-11
    pub sign_distance: usize,
}

impl AspectPair {
    /// House the aspect lands in, counted from the aspecting body (1-12).
    pub fn house(&self) -> usize {
        self.sign_distance + 1
    }
}

/// Aspecting body -> bodies it aspects, both in canonical order.
pub type AspectMap = BTreeMap<Body, Vec<Body>>;
