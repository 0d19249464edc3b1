#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use pakur_core::dashboard::DashboardState;
use pakur_core::intel::{IntelReply, IntelWorker};
use pakur_core::test_helpers::{scripted_service, ScriptedModel};

pub mod replies;

pub const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Worker backed by a scripted model; the model handle is returned for
/// inspecting recorded calls.
pub fn scripted_worker(model: ScriptedModel) -> (IntelWorker, Arc<ScriptedModel>) {
    let model = Arc::new(model);
    (IntelWorker::new(scripted_service(model.clone())), model)
}

pub fn next_reply(worker: &mut IntelWorker) -> IntelReply {
    worker
        .wait(REPLY_TIMEOUT)
        .expect("worker should reply before the timeout")
}

/// Applies one worker reply to the state the way the app does.
pub fn apply_reply(state: &mut DashboardState, reply: IntelReply) {
    match reply {
        IntelReply::Scan(outcome) => state.finish_scan(outcome),
        IntelReply::Route { ticket, info } => {
            state.finish_route(&ticket, info);
        }
    }
}
