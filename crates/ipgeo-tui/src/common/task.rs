#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SignIn,
    SignUp,
    SessionCheck,
    SelfLookup,
    Search,
    SignOut,
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
///
/// Several tasks of one kind may overlap; the state tracks the most recent
/// one and is cleared when that one finishes.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
    }

    /// Marks `id` finished. A task that is no longer the tracked one leaves
    /// the state alone.
    pub fn finish(&mut self, id: TaskId) {
        if self.active == Some(id) {
            self.active = None;
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub sign_in: TaskState,
    pub sign_up: TaskState,
    pub session_check: TaskState,
    pub self_lookup: TaskState,
    pub search: TaskState,
    pub sign_out: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::SignIn => &self.sign_in,
            TaskKind::SignUp => &self.sign_up,
            TaskKind::SessionCheck => &self.session_check,
            TaskKind::SelfLookup => &self.self_lookup,
            TaskKind::Search => &self.search,
            TaskKind::SignOut => &self.sign_out,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SignIn => &mut self.sign_in,
            TaskKind::SignUp => &mut self.sign_up,
            TaskKind::SessionCheck => &mut self.session_check,
            TaskKind::SelfLookup => &mut self.self_lookup,
            TaskKind::Search => &mut self.search,
            TaskKind::SignOut => &mut self.sign_out,
        }
    }

    /// True while a sign-in or sign-up request is in flight.
    pub fn is_auth_running(&self) -> bool {
        self.sign_in.is_running() || self.sign_up.is_running()
    }

    pub fn is_any_running(&self) -> bool {
        self.sign_in.is_running()
            || self.sign_up.is_running()
            || self.session_check.is_running()
            || self.self_lookup.is_running()
            || self.search.is_running()
            || self.sign_out.is_running()
    }
}
