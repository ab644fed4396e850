//! Constrained vehicle router for the courier engine.
//!
//! This crate provides [`VrpRouter`], the capacity- and time-window-aware
//! implementation of the [`Router`](courier_core::Router) trait. Each stop
//! becomes a mandatory delivery job in a `vrp-core` problem with one
//! vehicle per fleet slot, all starting and ending at the depot.
//!
//! Costs come from the scaled view of the shared
//! [`DistanceMatrix`](courier_core::DistanceMatrix) and durations are whole
//! transit minutes, so solutions replay exactly under
//! [`simulate_route`](courier_core::simulate_route). Stops the search cannot
//! place make the whole request [`Infeasible`](courier_core::RouteError::Infeasible).

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod router;
mod vrp;

pub use router::{VrpRouter, VrpRouterConfig};
