/// In-memory cloud used by the workflow tests
///
/// Verbs mutate the fake instance state the way the platform would, unless
/// an instance is configured to ignore them. Every call is recorded.
use async_trait::async_trait;
use fleet_lifecycle::external::CommandError;
use fleet_lifecycle::{Action, ComputePlatform, Field, Instance, InstanceId, InstanceStatus, PlatformError};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct FakeInstance {
    pub id: String,
    pub name: String,
    pub status: String,
    pub locked: bool,
    /// Verbs the platform accepts but never applies
    pub ignored: Vec<Action>,
}

impl FakeInstance {
    pub fn new(id: &str, name: &str, status: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status: status.to_string(),
            locked: false,
            ignored: Vec::new(),
        }
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn ignoring(mut self, action: Action) -> Self {
        self.ignored.push(action);
        self
    }
}

/// An instance that appears in listings only from the given scan onwards
struct Arrival {
    after_lists: usize,
    instance: FakeInstance,
}

#[derive(Default)]
struct State {
    instances: Vec<FakeInstance>,
    arrivals: Vec<Arrival>,
    list_calls: usize,
    actions: Vec<(String, Action)>,
}

#[derive(Default)]
pub struct FakeCloud {
    state: Mutex<State>,
}

impl FakeCloud {
    pub fn new(instances: Vec<FakeInstance>) -> Self {
        Self {
            state: Mutex::new(State {
                instances,
                ..State::default()
            }),
        }
    }

    /// Make `instance` show up once `after_lists` listings have been served
    pub fn with_arrival(self, after_lists: usize, instance: FakeInstance) -> Self {
        self.state.lock().unwrap().arrivals.push(Arrival { after_lists, instance });
        self
    }

    pub fn actions(&self) -> Vec<(String, Action)> {
        self.state.lock().unwrap().actions.clone()
    }

    pub fn actions_for(&self, id: &str) -> Vec<Action> {
        self.actions()
            .into_iter()
            .filter(|(target, _)| target == id)
            .map(|(_, action)| action)
            .collect()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn instance(&self, id: &str) -> FakeInstance {
        self.state
            .lock()
            .unwrap()
            .instances
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .expect("unknown fake instance")
    }
}

fn not_found(id: &InstanceId) -> PlatformError {
    PlatformError::CommandFailed {
        command: format!("openstack server show {id}"),
        status_code: 1,
        stderr: format!("No server with a name or ID of '{id}' exists."),
    }
}

#[async_trait]
impl ComputePlatform for FakeCloud {
    async fn list_instances(&self) -> Result<Vec<Instance>, PlatformError> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;

        let served = state.list_calls;
        let (arrived, waiting): (Vec<Arrival>, Vec<Arrival>) =
            state.arrivals.drain(..).partition(|a| served > a.after_lists);
        state.arrivals = waiting;
        state.instances.extend(arrived.into_iter().map(|a| a.instance));

        Ok(state
            .instances
            .iter()
            .map(|i| Instance::new(i.id.as_str(), i.name.as_str(), InstanceStatus::from(i.status.as_str())))
            .collect())
    }

    async fn show_field(&self, id: &InstanceId, field: Field) -> Result<String, PlatformError> {
        let state = self.state.lock().unwrap();
        let instance = state
            .instances
            .iter()
            .find(|i| i.id == id.as_str())
            .ok_or_else(|| not_found(id))?;

        Ok(match field {
            Field::Name => instance.name.clone(),
            Field::Status => instance.status.clone(),
            Field::Locked => (if instance.locked { "True" } else { "False" }).to_string(),
        })
    }

    async fn apply(&self, id: &InstanceId, action: Action) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap();
        state.actions.push((id.to_string(), action));

        let instance = state
            .instances
            .iter_mut()
            .find(|i| i.id == id.as_str())
            .ok_or(PlatformError::CommandError {
                source: CommandError::Io {
                    message: format!("unknown instance {id}"),
                },
            })?;

        if instance.ignored.contains(&action) {
            return Ok(());
        }

        match action {
            Action::Pause if !instance.locked => instance.status = "PAUSED".to_string(),
            Action::Unpause if !instance.locked => instance.status = "ACTIVE".to_string(),
            Action::Lock => instance.locked = true,
            Action::Unlock => instance.locked = false,
            // locked instances reject pause/unpause
            _ => {}
        }
        Ok(())
    }
}
