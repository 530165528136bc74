use tokio_util::sync::CancellationToken;

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
    PostList,
    PostCreate,
    SessionLoad,
    SignIn,
    SignOut,
}

impl TaskKind {
    pub const ALL: [TaskKind; 5] = [
        TaskKind::PostList,
        TaskKind::PostCreate,
        TaskKind::SessionLoad,
        TaskKind::SignIn,
        TaskKind::SignOut,
    ];

    /// Queries can be abandoned mid-flight; mutations and auth actions run to
    /// completion once sent.
    pub fn is_cancelable(self) -> bool {
        matches!(self, TaskKind::PostList | TaskKind::SessionLoad)
    }
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Marks `id` active as soon as its effect is emitted, before the runtime
    /// reports `TaskStarted` for it. Requests made in the same input batch then
    /// see the task as running.
    pub fn begin(&mut self, id: TaskId) {
        self.active = Some(id);
        self.cancel = None;
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
        self.cancel = started.cancel.clone();
    }

    /// Clears the state if `id` is the active task. A `false` return means the
    /// completion belongs to a superseded task and must be ignored.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.clear();
        }
        ok
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub post_list: TaskState,
    pub post_create: TaskState,
    pub session_load: TaskState,
    pub sign_in: TaskState,
    pub sign_out: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::PostList => &self.post_list,
            TaskKind::PostCreate => &self.post_create,
            TaskKind::SessionLoad => &self.session_load,
            TaskKind::SignIn => &self.sign_in,
            TaskKind::SignOut => &self.sign_out,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::PostList => &mut self.post_list,
            TaskKind::PostCreate => &mut self.post_create,
            TaskKind::SessionLoad => &mut self.session_load,
            TaskKind::SignIn => &mut self.sign_in,
            TaskKind::SignOut => &mut self.sign_out,
        }
    }

    pub fn is_any_running(&self) -> bool {
        TaskKind::ALL
            .iter()
            .any(|kind| self.state(*kind).is_running())
    }

    /// Auth actions are mutually exclusive: one sign-in or sign-out at a time.
    pub fn auth_action_running(&self) -> bool {
        self.sign_in.is_running() || self.sign_out.is_running()
    }
}
