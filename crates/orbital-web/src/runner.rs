use orbital_core::{
    Command, CommandQueue, HintContext, HintError, MoleculeCatalog, OfflineHints, Session,
    SessionConfig, SessionError, StatsLayout,
};

/// Session runner that wires the placement engine to the browser.
///
/// The app crate keeps a `thread_local!` SessionRunner and exports free
/// functions via `#[wasm_bindgen]` (see [`export_session!`](crate::export_session)).
/// Hints are asynchronous on the JS side: `begin_hint` hands out a request,
/// `finish_hint` delivers the answer whenever it arrives.
pub struct SessionRunner {
    session: Session,
    input: CommandQueue,
    layout: StatsLayout,
    /// Flat stats buffer for direct memory reads.
    stats_buffer: Vec<f32>,
    /// Flat buffer of cue IDs.
    cue_buffer: Vec<u8>,
}

impl SessionRunner {
    pub fn new(session: Session) -> Self {
        let layout = StatsLayout::new(session.configuration().len());
        // max_cues is enforced by the session at push time.
        let mut runner = Self {
            session,
            input: CommandQueue::new(),
            layout,
            stats_buffer: Vec::with_capacity(layout.total_floats),
            cue_buffer: Vec::new(),
        };
        runner.refresh();
        runner
    }

    /// Build a runner from optional JSON settings and molecule table.
    /// Malformed settings fall back to defaults; a malformed table is an error.
    pub fn from_json(config_json: Option<&str>, catalog_json: Option<&str>) -> Result<Self, SessionError> {
        let config = match config_json {
            Some(json) => SessionConfig::from_json(json).unwrap_or_else(|err| {
                log::error!("invalid session config, using defaults: {}", err);
                SessionConfig::default()
            }),
            None => SessionConfig::default(),
        };
        let catalog = match catalog_json {
            Some(json) => MoleculeCatalog::from_json(json)?,
            None => MoleculeCatalog::load()?,
        };
        // The browser answers hints through begin/finish, never synchronously.
        let session = Session::new(catalog, config, Box::new(OfflineHints))?;
        Ok(Self::new(session))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn push_command(&mut self, command: Command) {
        self.input.push(command);
    }

    /// Apply queued commands and rebuild the output buffers.
    pub fn tick(&mut self) {
        self.session.clear_frame_data();
        self.session.update(&self.input);
        self.input.drain();
        self.refresh();
    }

    /// Start a configuration hint; returns the request as JSON.
    pub fn begin_hint(&mut self) -> Result<String, serde_json::Error> {
        let context = HintContext::configuration(self.session.molecule(), self.session.configuration());
        let request = self.session.begin_hint(context);
        serde_json::to_string(&request)
    }

    /// Start a hint comparing catalog species; returns the request as JSON.
    pub fn begin_comparison_hint(&mut self, ids: &[String]) -> Result<String, serde_json::Error> {
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        let context = self.session.comparison_context(&ids);
        let request = self.session.begin_hint(context);
        serde_json::to_string(&request)
    }

    /// Deliver a hint answer. `None` means the JS call failed or timed out.
    /// Returns false if the request was superseded.
    pub fn finish_hint(&mut self, request_id: u64, text: Option<String>) -> bool {
        let response = text.ok_or_else(|| HintError::Unavailable("request failed in browser".into()));
        let settled = self.session.finish_hint(request_id, response).is_some();
        self.refresh();
        settled
    }

    fn refresh(&mut self) {
        let orbital_count = self.session.configuration().len();
        if orbital_count != self.layout.orbital_count {
            self.layout = StatsLayout::new(orbital_count);
        }
        self.layout.write(&self.session, &mut self.stats_buffer);

        self.cue_buffer.clear();
        for cue in self.session.cues() {
            self.cue_buffer.push(cue.0 as u8);
        }
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn stats_ptr(&self) -> *const f32 {
        self.stats_buffer.as_ptr()
    }

    pub fn stats_len(&self) -> u32 {
        self.stats_buffer.len() as u32
    }

    pub fn cues_ptr(&self) -> *const u8 {
        self.cue_buffer.as_ptr()
    }

    pub fn cues_len(&self) -> u32 {
        self.cue_buffer.len() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.session.events().as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.session.events().len() as u32
    }

    // ---- JSON accessors for the UI ----

    pub fn molecules_json(&self) -> Result<String, serde_json::Error> {
        let molecules: Vec<_> = self.session.catalog().iter().collect();
        serde_json::to_string(&molecules)
    }

    pub fn molecule_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.session.molecule())
    }

    pub fn orbitals_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self.session.configuration())
    }

    pub fn stats_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.session.stats())
    }

    pub fn feedback_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.session.feedback())
    }
}
