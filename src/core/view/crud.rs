//! Create, edit, look up, delete and list: the same five screens for every
//! entity kind.

use crate::core::entity::{EntityKind, EntitySnapshot};
use crate::core::form::{Form, parse_id};
use crate::core::screen::ScreenId;
use crate::core::view::{Flash, Input, Navigation, Outcome, ScreenView, failure_text, issue, step};
use crate::gateway::{ApiPayload, ApiRequest, GatewayError, TriFilter};

/// The entity a create/update request carries.
fn submitted(request: &ApiRequest) -> Option<EntitySnapshot> {
    match request {
        ApiRequest::CreateAnimal(a) | ApiRequest::UpdateAnimal(a) => Some(a.clone().into()),
        ApiRequest::CreateHabitat(h) | ApiRequest::UpdateHabitat(h) => Some(h.clone().into()),
        ApiRequest::CreateKeeper(k) | ApiRequest::UpdateKeeper(k) => Some(k.clone().into()),
        _ => None,
    }
}

fn looked_up_id(request: &ApiRequest) -> Option<i64> {
    match request {
        ApiRequest::GetAnimal(id) | ApiRequest::GetHabitat(id) | ApiRequest::GetKeeper(id) => {
            Some(*id)
        }
        _ => None,
    }
}

// ============================================================================
// Create / edit form
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub screen: ScreenId,
    pub kind: EntityKind,
    pub mode: FormMode,
    pub form: Form,
    /// The snapshot being edited; `None` when creating.
    pub original: Option<EntitySnapshot>,
    pub flash: Option<Flash>,
    pub pending: Vec<ApiRequest>,
}

impl FormView {
    pub fn create(screen: ScreenId, kind: EntityKind) -> Self {
        Self {
            screen,
            kind,
            mode: FormMode::Create,
            form: Form::blank(kind),
            original: None,
            flash: None,
            pending: Vec::new(),
        }
    }

    pub fn edit(screen: ScreenId, snapshot: EntitySnapshot) -> Self {
        Self {
            screen,
            kind: snapshot.kind(),
            mode: FormMode::Edit,
            form: Form::editing(&snapshot),
            original: Some(snapshot),
            flash: None,
            pending: Vec::new(),
        }
    }

    fn submit(&mut self) -> Outcome {
        if !self.pending.is_empty() {
            return Outcome::Stay;
        }
        match self.form.build(self.kind, self.original.as_ref()) {
            Err(e) => {
                self.flash = Some(Flash::Error(e.to_string()));
                Outcome::Stay
            }
            Ok(snapshot) => {
                self.flash = None;
                let request = match self.mode {
                    FormMode::Create => ApiRequest::create(snapshot),
                    FormMode::Edit => ApiRequest::update(snapshot),
                };
                issue(&mut self.pending, request)
            }
        }
    }

    fn created(&mut self, saved: EntitySnapshot) -> Outcome {
        let name = saved.display_name();
        if self.kind == EntityKind::Keeper {
            return Outcome::Navigate(
                Navigation::to(ScreenId::ListKeepers)
                    .with_notice(format!("Keeper \"{name}\" created")),
            );
        }
        self.form = Form::blank(self.kind);
        self.flash = Some(Flash::Success(format!(
            "{} \"{}\" created with ID {}",
            self.kind.title(),
            name,
            saved.id()
        )));
        Outcome::Stay
    }
}

impl ScreenView for FormView {
    fn pending(&self) -> &[ApiRequest] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<ApiRequest> {
        &mut self.pending
    }

    fn input(&mut self, input: Input) -> Outcome {
        match input {
            Input::Char(c) => self.form.insert_char(c),
            Input::Backspace => self.form.backspace(),
            Input::NextField | Input::Down => self.form.focus_next(),
            Input::PrevField | Input::Up => self.form.focus_prev(),
            Input::CycleNext | Input::CyclePrev => self.form.toggle(),
            Input::Submit => return self.submit(),
            Input::Back => {
                if let Some(back) = self.screen.back_target() {
                    return Outcome::Navigate(Navigation::to(back).clearing(self.kind));
                }
            }
            Input::Refresh => {}
        }
        Outcome::Stay
    }

    fn on_response(
        &mut self,
        request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome {
        let sent = submitted(&request);
        match (self.mode, result) {
            (FormMode::Create, Ok(payload)) => {
                match payload.into_snapshot().or(sent) {
                    Some(saved) => self.created(saved),
                    None => Outcome::Stay,
                }
            }
            (FormMode::Create, Err(GatewayError::Conflict { message })) => {
                self.flash = Some(Flash::Error(message.unwrap_or_else(|| {
                    format!("A {} with that ID already exists.", self.kind)
                })));
                Outcome::Stay
            }
            (FormMode::Edit, Ok(payload)) => {
                let name = payload
                    .into_snapshot()
                    .or(sent)
                    .map(|s| s.display_name())
                    .unwrap_or_default();
                Outcome::Navigate(
                    Navigation::to(ScreenId::list_for(self.kind))
                        .clearing(self.kind)
                        .with_notice(format!("{} \"{}\" updated", self.kind.title(), name)),
                )
            }
            (mode, Err(e)) => {
                let verb = match mode {
                    FormMode::Create => "create",
                    FormMode::Edit => "update",
                };
                self.flash = Some(Flash::Error(failure_text(
                    &e,
                    &format!("{verb} the {}", self.kind),
                )));
                Outcome::Stay
            }
        }
    }
}

// ============================================================================
// Search-by-id step before edit/delete
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LookupView {
    pub kind: EntityKind,
    /// Edit or delete screen entered on a hit.
    pub target: ScreenId,
    pub input: String,
    pub flash: Option<Flash>,
    pub pending: Vec<ApiRequest>,
}

impl LookupView {
    pub fn new(kind: EntityKind, target: ScreenId) -> Self {
        Self {
            kind,
            target,
            input: String::new(),
            flash: None,
            pending: Vec::new(),
        }
    }
}

impl ScreenView for LookupView {
    fn pending(&self) -> &[ApiRequest] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<ApiRequest> {
        &mut self.pending
    }

    fn input(&mut self, input: Input) -> Outcome {
        match input {
            Input::Char(c) if c.is_ascii_digit() => {
                self.input.push(c);
                self.flash = None;
            }
            Input::Backspace => {
                self.input.pop();
            }
            Input::Submit if self.pending.is_empty() => match parse_id(&self.input, "ID") {
                Ok(id) => return issue(&mut self.pending, ApiRequest::get(self.kind, id)),
                Err(_) => {
                    self.flash = Some(Flash::Error("Enter a valid numeric ID.".to_string()));
                }
            },
            _ => {}
        }
        Outcome::Stay
    }

    fn on_response(
        &mut self,
        request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome {
        match result {
            Ok(payload) => match payload.into_snapshot() {
                Some(found) if found.kind() == self.kind => {
                    Outcome::Navigate(Navigation::to(self.target).with_payload(found))
                }
                _ => {
                    self.flash = Some(Flash::Error(
                        "The server sent an unexpected response.".to_string(),
                    ));
                    Outcome::Stay
                }
            },
            Err(GatewayError::NotFound) => {
                let id = looked_up_id(&request).unwrap_or_default();
                self.flash = Some(Flash::Error(format!("No {} found with ID {id}.", self.kind)));
                Outcome::Stay
            }
            Err(e) => {
                self.flash = Some(Flash::Error(failure_text(
                    &e,
                    &format!("look up the {}", self.kind),
                )));
                Outcome::Stay
            }
        }
    }
}

// ============================================================================
// Delete confirmation
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteView {
    pub screen: ScreenId,
    pub snapshot: EntitySnapshot,
    /// First Enter arms, second Enter (or `y`) deletes.
    pub armed: bool,
    pub flash: Option<Flash>,
    pub pending: Vec<ApiRequest>,
}

impl DeleteView {
    pub fn new(screen: ScreenId, snapshot: EntitySnapshot) -> Self {
        Self {
            screen,
            snapshot,
            armed: false,
            flash: None,
            pending: Vec::new(),
        }
    }

    fn confirm(&mut self) -> Outcome {
        if !self.pending.is_empty() {
            return Outcome::Stay;
        }
        if !self.armed {
            self.armed = true;
            self.flash = None;
            return Outcome::Stay;
        }
        let request = ApiRequest::delete(self.snapshot.kind(), self.snapshot.id());
        issue(&mut self.pending, request)
    }

    fn conflict_text(&self) -> String {
        match self.snapshot.kind() {
            EntityKind::Habitat => {
                "This habitat still has animals assigned and cannot be deleted.".to_string()
            }
            EntityKind::Keeper => {
                "This keeper is still assigned to animals and cannot be deleted.".to_string()
            }
            EntityKind::Animal => "The server refused to delete this animal.".to_string(),
        }
    }
}

impl ScreenView for DeleteView {
    fn pending(&self) -> &[ApiRequest] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<ApiRequest> {
        &mut self.pending
    }

    fn input(&mut self, input: Input) -> Outcome {
        let kind = self.snapshot.kind();
        match input {
            Input::Submit => self.confirm(),
            Input::Char('y' | 'Y') if self.armed => self.confirm(),
            Input::Char('n' | 'N') | Input::Back if self.armed => {
                self.armed = false;
                Outcome::Stay
            }
            Input::Back => match self.screen.back_target() {
                Some(back) => Outcome::Navigate(Navigation::to(back).clearing(kind)),
                None => Outcome::Stay,
            },
            _ => Outcome::Stay,
        }
    }

    fn on_response(
        &mut self,
        _request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome {
        let kind = self.snapshot.kind();
        self.armed = false;
        match result {
            Ok(_) => Outcome::Navigate(
                Navigation::to(ScreenId::list_for(kind))
                    .clearing(kind)
                    .with_notice(format!(
                        "{} \"{}\" deleted",
                        kind.title(),
                        self.snapshot.display_name()
                    )),
            ),
            Err(GatewayError::Conflict { message }) => {
                let text = message.unwrap_or_else(|| self.conflict_text());
                log::info!("Delete of {kind} {} rejected: {text}", self.snapshot.id());
                self.flash = Some(Flash::Error(text));
                Outcome::Stay
            }
            Err(e) => {
                self.flash = Some(Flash::Error(failure_text(&e, &format!("delete the {kind}"))));
                Outcome::Stay
            }
        }
    }
}

// ============================================================================
// Filtered list
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    pub kind: EntityKind,
    pub filter: TriFilter,
    pub items: Vec<EntitySnapshot>,
    pub cursor: usize,
    /// False until the first response arrives.
    pub loaded: bool,
    pub flash: Option<Flash>,
    pub pending: Vec<ApiRequest>,
}

impl ListView {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            filter: TriFilter::All,
            items: Vec::new(),
            cursor: 0,
            loaded: false,
            flash: None,
            pending: Vec::new(),
        }
    }

    pub fn request(&self) -> ApiRequest {
        ApiRequest::list(self.kind, self.filter)
    }

    pub fn selected(&self) -> Option<&EntitySnapshot> {
        self.items.get(self.cursor)
    }

    /// Re-fetch with the current filter. Earlier fetches are forgotten so a
    /// slow response for an old filter cannot overwrite a newer one.
    fn reload(&mut self) -> Outcome {
        self.pending.clear();
        let request = self.request();
        issue(&mut self.pending, request)
    }
}

impl ScreenView for ListView {
    fn pending(&self) -> &[ApiRequest] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<ApiRequest> {
        &mut self.pending
    }

    fn input(&mut self, input: Input) -> Outcome {
        match input {
            Input::CycleNext => {
                self.filter = self.filter.next();
                self.reload()
            }
            Input::CyclePrev => {
                self.filter = self.filter.prev();
                self.reload()
            }
            Input::Refresh => self.reload(),
            Input::Up | Input::Down => {
                self.cursor = step(self.cursor, self.items.len(), input == Input::Down);
                Outcome::Stay
            }
            _ => Outcome::Stay,
        }
    }

    fn on_response(
        &mut self,
        _request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome {
        self.loaded = true;
        match result {
            Ok(payload) => {
                self.items = payload.into_snapshots().unwrap_or_default();
                self.cursor = self.cursor.min(self.items.len().saturating_sub(1));
                self.flash = None;
            }
            Err(e) => {
                self.items.clear();
                self.cursor = 0;
                self.flash = Some(Flash::Error(failure_text(&e, &format!("load {}s", self.kind))));
            }
        }
        Outcome::Stay
    }
}
