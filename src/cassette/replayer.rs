//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Interactions for one port/method pair plus the replay position.
#[derive(Debug, Default)]
struct Track {
    interactions: Vec<Interaction>,
    cursor: usize,
}

/// Replays interactions from a loaded cassette, serving them sequentially
/// per port/method pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    tracks: HashMap<PortMethodKey, Track>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut tracks: HashMap<PortMethodKey, Track> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            tracks.entry(key).or_default().interactions.push(interaction.clone());
        }
        Self { tracks }
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination, naming what was requested and what remains.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> &Interaction {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        if !self.tracks.contains_key(&key) {
            let mut available: Vec<String> =
                self.tracks.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        }

        let track = self.tracks.entry(key).or_default();
        assert!(
            track.cursor < track.interactions.len(),
            "Cassette exhausted: all {count} interactions for port={port:?} method={method:?} \
             have been consumed. Last interaction was seq={last_seq}.",
            count = track.interactions.len(),
            last_seq = track.interactions.last().map_or(0, |i| i.seq),
        );

        let interaction = &track.interactions[track.cursor];
        track.cursor += 1;
        interaction
    }

    /// Number of interactions not yet served, across all ports.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.tracks.values().map(|t| t.interactions.len() - t.cursor).sum()
    }
}
