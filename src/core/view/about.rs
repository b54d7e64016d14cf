use crate::core::view::{Input, Outcome, ScreenView, issue};
use crate::gateway::{ApiPayload, ApiRequest, GatewayError};

/// Backend reachability as last observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

impl ApiStatus {
    pub fn label(self) -> &'static str {
        match self {
            ApiStatus::Checking => "checking…",
            ApiStatus::Online => "online",
            ApiStatus::Offline => "offline",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AboutView {
    pub status: ApiStatus,
    pub pending: Vec<ApiRequest>,
}

impl AboutView {
    /// Issue a health probe unless one is already out.
    pub fn poll(&mut self) -> Outcome {
        if self.pending.is_empty() {
            issue(&mut self.pending, ApiRequest::Health)
        } else {
            Outcome::Stay
        }
    }
}

impl ScreenView for AboutView {
    fn pending(&self) -> &[ApiRequest] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<ApiRequest> {
        &mut self.pending
    }

    fn input(&mut self, input: Input) -> Outcome {
        match input {
            Input::Refresh | Input::Submit => self.poll(),
            _ => Outcome::Stay,
        }
    }

    fn on_response(
        &mut self,
        _request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome {
        self.status = match result {
            Ok(_) => ApiStatus::Online,
            Err(e) => {
                log::info!("Health check failed: {e}");
                ApiStatus::Offline
            }
        };
        Outcome::Stay
    }
}
