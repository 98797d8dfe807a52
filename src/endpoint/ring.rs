//! Ordered, rotatable endpoint ring.

use std::collections::VecDeque;

/// Ordered pool of endpoint URIs with a movable head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointRing {
    endpoints: VecDeque<String>,
}

impl EndpointRing {
    pub fn new<I, S>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endpoints: endpoints.into_iter().map(Into::into).collect(),
        }
    }

    /// Head of the ring.
    pub fn current(&self) -> Option<&str> {
        self.endpoints.front().map(String::as_str)
    }

    /// Element after the head. Absent for rings with fewer than two members.
    pub fn next(&self) -> Option<&str> {
        self.endpoints.get(1).map(String::as_str)
    }

    /// Element that follows the first occurrence of `uri`, cyclically.
    pub fn successor(&self, uri: &str) -> Option<&str> {
        if self.endpoints.len() < 2 {
            return None;
        }
        let idx = self.endpoints.iter().position(|e| e == uri)?;
        self.endpoints
            .get((idx + 1) % self.endpoints.len())
            .map(String::as_str)
    }

    /// Move the head forward by one, cyclically.
    pub fn rotate(&mut self) {
        if self.endpoints.len() > 1 {
            self.endpoints.rotate_left(1);
        }
    }

    pub fn size(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.endpoints.iter().map(String::as_str)
    }

    /// Ring members in order, first occurrence of each URI only.
    pub fn distinct(&self) -> Vec<&str> {
        let mut seen = Vec::with_capacity(self.endpoints.len());
        for uri in self.iter() {
            if !seen.contains(&uri) {
                seen.push(uri);
            }
        }
        seen
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.endpoints.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for EndpointRing {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
