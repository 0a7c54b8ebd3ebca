//! Inter-slice domain events, broadcast after a mutation completes.

/// A new application finished registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationRegistered {
    pub id: i64,
}

/// An existing application was replaced with new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationUpdated {
    pub id: i64,
}
