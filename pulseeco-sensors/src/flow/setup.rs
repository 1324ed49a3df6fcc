//! Initial setup: connect to a city, then pick stations.

use tracing::{error, info};

use crate::directory::list_active_stations;
use crate::domain::{EntryId, Selection, StationSummary};
use crate::entry::{ConfigEntry, ConnectionParams, EntryData};
use crate::pulseeco::{PulseEcoApi, PulseEcoError};

use super::form::{FlowStep, FormError, StationForm, StepId};

#[derive(Debug)]
enum SetupState {
    AwaitingConnection,
    AwaitingSelection {
        params: ConnectionParams,
        directory: Vec<StationSummary>,
    },
    Finished,
}

/// Two-step setup flow.
///
/// `connect` builds an API client from connection parameters; it is called
/// once per submitted connection form.
pub struct SetupFlow<F> {
    entry_id: EntryId,
    connect: F,
    state: SetupState,
}

impl<F> SetupFlow<F> {
    /// Start a flow that will create the entry `entry_id`.
    pub fn new(entry_id: EntryId, connect: F) -> Self {
        Self {
            entry_id,
            connect,
            state: SetupState::AwaitingConnection,
        }
    }

    /// The first form to show.
    pub fn start(&self) -> FlowStep {
        FlowStep::ShowConnectionForm { error: None }
    }

    /// Whether the flow has produced its entry.
    pub fn is_finished(&self) -> bool {
        matches!(self.state, SetupState::Finished)
    }

    /// Handle the connection form.
    ///
    /// Fetches the station directory. On any failure the connection form
    /// is shown again with an `unknown` error and the flow does not advance.
    pub async fn submit_connection<A>(&mut self, params: ConnectionParams) -> FlowStep
    where
        F: Fn(&ConnectionParams) -> Result<A, PulseEcoError>,
        A: PulseEcoApi,
    {
        if !matches!(self.state, SetupState::AwaitingConnection) {
            return self.current_step();
        }

        let directory = match (self.connect)(&params) {
            Ok(api) => list_active_stations(&api).await,
            Err(e) => Err(e),
        };

        match directory {
            Ok(directory) => {
                info!(city = %params.city, stations = directory.len(), "fetched station directory");
                self.state = SetupState::AwaitingSelection { params, directory };
                self.current_step()
            }
            Err(e) => {
                error!(city = %params.city, error = %e, "unexpected error during setup");
                FlowStep::ShowConnectionForm {
                    error: Some(FormError::Unknown),
                }
            }
        }
    }

    /// Handle the station multi-select.
    ///
    /// An empty choice, or one matching no listed station, re-shows the
    /// same form. Otherwise the entry is created and the flow finishes.
    pub fn submit_selection(&mut self, chosen: &[String]) -> FlowStep {
        let SetupState::AwaitingSelection { params, directory } = &self.state else {
            return self.current_step();
        };

        let selection = Selection::from_choices(directory, chosen);
        if selection.is_empty() {
            return FlowStep::ShowStationForm(
                station_form(directory).with_error(FormError::NoStationsSelected),
            );
        }

        let entry = ConfigEntry {
            entry_id: self.entry_id.clone(),
            title: format!("PulseEco Integration for {}", params.city),
            data: EntryData {
                connection: params.clone(),
                measuring_stations: directory.clone(),
                selected_measuring_stations: selection,
            },
            options: None,
        };

        info!(
            entry_id = %entry.entry_id,
            stations = entry.data.selected_measuring_stations.len(),
            "created entry"
        );
        self.state = SetupState::Finished;
        FlowStep::CreateEntry(entry)
    }

    fn current_step(&self) -> FlowStep {
        match &self.state {
            SetupState::AwaitingConnection | SetupState::Finished => {
                FlowStep::ShowConnectionForm { error: None }
            }
            SetupState::AwaitingSelection { directory, .. } => {
                FlowStep::ShowStationForm(station_form(directory))
            }
        }
    }
}

fn station_form(directory: &[StationSummary]) -> StationForm {
    StationForm::new(
        StepId::MeasuringStationSelection,
        directory.iter().map(|s| s.description.clone()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Station, StationId, StationStatus};
    use crate::pulseeco::MockPulseEcoClient;
    use std::cell::Cell;

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn mock() -> MockPulseEcoClient {
        MockPulseEcoClient::with_data(
            vec![
                Station::new(id("A"), "Center", StationStatus::Active),
                Station::new(id("B"), "Port", StationStatus::Inactive),
                Station::new(id("C"), "Airport", StationStatus::NotClaimed),
            ],
            [],
        )
    }

    fn flow(
        api: MockPulseEcoClient,
    ) -> SetupFlow<impl Fn(&ConnectionParams) -> Result<MockPulseEcoClient, PulseEcoError>> {
        SetupFlow::new(EntryId::new("e1"), move |_: &ConnectionParams| {
            Ok::<_, PulseEcoError>(api.clone())
        })
    }

    #[tokio::test]
    async fn happy_path() {
        let mut flow = flow(mock());
        assert_eq!(flow.start(), FlowStep::ShowConnectionForm { error: None });

        let step = flow.submit_connection(ConnectionParams::new("skopje")).await;
        let FlowStep::ShowStationForm(form) = step else {
            panic!("expected station form, got {step:?}");
        };
        assert_eq!(form.step_id, StepId::MeasuringStationSelection);
        // Sorted, inactive "Port" excluded.
        assert_eq!(form.options, vec!["Airport", "Center"]);

        let step = flow.submit_selection(&["Center".into()]);
        let FlowStep::CreateEntry(entry) = step else {
            panic!("expected entry, got {step:?}");
        };
        assert!(flow.is_finished());
        assert_eq!(entry.entry_id, EntryId::new("e1"));
        assert_eq!(entry.title, "PulseEco Integration for skopje");
        assert_eq!(entry.data.measuring_stations.len(), 2);

        let mut expected = Selection::new();
        expected.insert(id("A"), "Center");
        assert_eq!(entry.data.selected_measuring_stations, expected);
        assert!(entry.options.is_none());
    }

    #[tokio::test]
    async fn upstream_failure_reprompts_connection() {
        let api = mock();
        api.set_directory_failing(true).await;
        let mut flow = flow(api.clone());

        let step = flow.submit_connection(ConnectionParams::new("skopje")).await;
        assert_eq!(
            step,
            FlowStep::ShowConnectionForm {
                error: Some(FormError::Unknown)
            }
        );

        // Still on step one: a selection is not accepted.
        assert_eq!(
            flow.submit_selection(&["Center".into()]),
            FlowStep::ShowConnectionForm { error: None }
        );

        api.set_directory_failing(false).await;
        let step = flow.submit_connection(ConnectionParams::new("skopje")).await;
        assert!(matches!(step, FlowStep::ShowStationForm(_)));
    }

    #[tokio::test]
    async fn client_construction_failure_reprompts_connection() {
        let mut flow = SetupFlow::new(EntryId::new("e1"), |_: &ConnectionParams| {
            Err::<MockPulseEcoClient, _>(PulseEcoError::InvalidConfig("bad city".into()))
        });

        let step = flow.submit_connection(ConnectionParams::new("")).await;
        assert_eq!(
            step,
            FlowStep::ShowConnectionForm {
                error: Some(FormError::Unknown)
            }
        );
    }

    #[tokio::test]
    async fn empty_selection_never_creates_entry() {
        let mut flow = flow(mock());
        flow.submit_connection(ConnectionParams::new("skopje")).await;

        for _ in 0..3 {
            let step = flow.submit_selection(&[]);
            let FlowStep::ShowStationForm(form) = step else {
                panic!("expected station form, got {step:?}");
            };
            assert_eq!(form.options, vec!["Airport", "Center"]);
            assert_eq!(form.error, Some(FormError::NoStationsSelected));
            assert!(!flow.is_finished());
        }

        // Descriptions matching nothing count as empty.
        let step = flow.submit_selection(&["Nowhere".into()]);
        assert!(matches!(step, FlowStep::ShowStationForm(_)));

        let step = flow.submit_selection(&["Airport".into()]);
        assert!(matches!(step, FlowStep::CreateEntry(_)));
    }

    #[tokio::test]
    async fn connect_is_called_with_submitted_params() {
        let calls = Cell::new(0);
        let api = mock();
        let mut flow = SetupFlow::new(EntryId::new("e1"), |params: &ConnectionParams| {
            calls.set(calls.get() + 1);
            assert_eq!(params.credentials(), Some(("user", "secret")));
            Ok::<_, PulseEcoError>(api.clone())
        });

        let params = ConnectionParams::new("skopje")
            .with_username("user")
            .with_password("secret");
        flow.submit_connection(params).await;
        assert_eq!(calls.get(), 1);
    }
}
