use crate::DomainError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxyState {
    #[default]
    Stopped,
    Starting,
    Running,
    Sleeping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Start,
    Ready,
    Sleep,
    Wake,
    Stop,
}

impl ProxyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Sleeping => "sleeping",
        }
    }

    pub fn accepts_flows(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Applies `event`, returning the state the proxy moves to.
    ///
    /// `Stop` is accepted from every state; every other event has exactly one
    /// source state.
    pub fn transition(self, event: LifecycleEvent) -> Result<Self, DomainError> {
        match (self, event) {
            (_, LifecycleEvent::Stop) => Ok(Self::Stopped),
            (Self::Stopped, LifecycleEvent::Start) => Ok(Self::Starting),
            (Self::Starting, LifecycleEvent::Ready) => Ok(Self::Running),
            (Self::Running, LifecycleEvent::Sleep) => Ok(Self::Sleeping),
            (Self::Sleeping, LifecycleEvent::Wake) => Ok(Self::Running),
            (from, event) => Err(DomainError::InvalidTransition {
                from: from.as_str(),
                event: event.as_str(),
            }),
        }
    }
}

impl LifecycleEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Ready => "finish starting",
            Self::Sleep => "sleep",
            Self::Wake => "wake",
            Self::Stop => "stop",
        }
    }
}

impl fmt::Display for ProxyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
