// SPDX-License-Identifier: LGPL-3.0-only
use crate::actor::ActorId;
use thiserror::Error;

/// Errors returned by stage and tree manipulation APIs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MxError {
    /// The handle does not name a live actor.
    #[error("unknown actor {0}")]
    UnknownActor(ActorId),
    /// The actor is not attached to the stage root.
    #[error("actor {0} is not attached to the stage")]
    NotOnStage(ActorId),
    /// Stage coordinates cannot be mapped into the actor because it is not mapped.
    #[error("cannot transform stage coordinates into actor {0}: actor is not mapped")]
    NotTransformable(ActorId),
    /// The actor does not carry the requested layout manager.
    #[error("actor {actor} is not a {expected} container")]
    NotAContainer {
        /// The actor that was addressed.
        actor: ActorId,
        /// Type name of the expected layout manager.
        expected: &'static str,
    },
    /// The child already has a parent.
    #[error("actor {0} already has a parent")]
    AlreadyParented(ActorId),
    /// The child does not belong to the given parent.
    #[error("actor {child} is not a child of {parent}")]
    NotAChild {
        /// The supposed parent.
        parent: ActorId,
        /// The supposed child.
        child: ActorId,
    },
    /// Parenting would make an actor its own ancestor.
    #[error("adding {child} to {parent} would create a cycle")]
    Cycle {
        /// The requested parent.
        parent: ActorId,
        /// The requested child.
        child: ActorId,
    },
    /// The parent's layout manager refused the child.
    #[error("actor {parent} does not take {child} as a child")]
    ChildRefused {
        /// The requested parent.
        parent: ActorId,
        /// The refused child.
        child: ActorId,
    },
    /// The stage root cannot be reparented or destroyed.
    #[error("the stage root cannot be reparented or destroyed")]
    RootActor,
    /// A configuration value could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    Config {
        /// Name of the setting.
        key: String,
        /// The rejected value.
        value: String,
    },
}

/// Shorthand for results carrying a [MxError].
pub type Result<T> = std::result::Result<T, MxError>;
