use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crate::dashboard::RouteTicket;
use crate::model::RouteInfo;

use super::service::{IntelService, ScanOutcome, ScanRequest};
use super::Intel;

/// Work the dashboard hands off so the UI thread never blocks on the network.
#[derive(Debug, Clone)]
pub enum IntelJob {
    Scan(ScanRequest),
    Route(RouteTicket),
}

#[derive(Debug, Clone)]
pub enum IntelReply {
    Scan(ScanOutcome),
    Route {
        ticket: RouteTicket,
        info: Intel<RouteInfo>,
    },
}

/// Runs each job on its own thread and funnels replies back through one
/// channel, drained by the owner once per frame.
pub struct IntelWorker {
    service: IntelService,
    sender: Sender<IntelReply>,
    receiver: Receiver<IntelReply>,
    inflight: usize,
}

impl IntelWorker {
    pub fn new(service: IntelService) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            service,
            sender,
            receiver,
            inflight: 0,
        }
    }

    pub fn service(&self) -> &IntelService {
        &self.service
    }

    pub fn submit(&mut self, job: IntelJob) {
        self.inflight += 1;
        let service = self.service.clone();
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let reply = match job {
                IntelJob::Scan(request) => IntelReply::Scan(service.scan(&request)),
                IntelJob::Route(ticket) => {
                    let info = service.route_logistics(&ticket.name, &ticket.address);
                    IntelReply::Route { ticket, info }
                }
            };
            let _ = sender.send(reply);
        });
    }

    /// Replies that arrived since the last call, without blocking.
    pub fn drain(&mut self) -> Vec<IntelReply> {
        let mut replies = Vec::new();
        while let Ok(reply) = self.receiver.try_recv() {
            self.inflight = self.inflight.saturating_sub(1);
            replies.push(reply);
        }
        replies
    }

    /// Blocks for the next reply, up to `timeout`.
    pub fn wait(&mut self, timeout: Duration) -> Option<IntelReply> {
        match self.receiver.recv_timeout(timeout) {
            Ok(reply) => {
                self.inflight = self.inflight.saturating_sub(1);
                Some(reply)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    pub fn inflight(&self) -> usize {
        self.inflight
    }
}
