//! Full CRUD flows against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives a `Session` over
//! real HTTP using ureq. After every mutation the displayed list must equal
//! the server's own collection.

use std::time::Duration;

use todo_core::{
    CreationForm, DeleteControl, HttpMethod, HttpRequest, HttpResponse, Session, SurfaceKey,
    TodoClient, TodoItem, Transport, TransportError, UpdateSurfaces,
};

/// Executes requests with ureq, returning 4xx/5xx responses as data.
struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = req.path.clone();
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&url).call(),
            (HttpMethod::Post, body) => self
                .agent
                .post(&url)
                .content_type("application/json")
                .send(body.unwrap_or_default().as_bytes()),
            (HttpMethod::Put, body) => self
                .agent
                .put(&url)
                .content_type("application/json")
                .send(body.unwrap_or_default().as_bytes()),
            (HttpMethod::Delete, Some(body)) => self
                .agent
                .delete(&url)
                .force_send_body()
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Delete, None) => self.agent.delete(&url).call(),
        };

        let mut response = result.map_err(|e| TransportError::Connect {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn start_server() -> (mock_server::Db, String) {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let db = mock_server::Db::default();
    let server_db = db.clone();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, server_db).await
        })
        .unwrap();
    });

    (db, format!("http://{addr}"))
}

fn authoritative(db: &mock_server::Db) -> Vec<TodoItem> {
    db.blocking_read()
        .iter()
        .map(|t| TodoItem::new(t.id.clone(), t.item.clone()))
        .collect()
}

#[test]
fn crud_lifecycle() {
    let (db, url) = start_server();
    let mut session = Session::new(TodoClient::new(&url), UreqTransport::new());

    // Initial load: empty.
    assert_eq!(session.start(0, Duration::ZERO).unwrap(), 0);

    // Create through the form.
    let mut form = CreationForm::new(false);
    form.set_input("buy milk");
    assert!(session.perform(&form.submit()).is_applied());
    assert_eq!(session.items().len(), 1);
    assert_eq!(session.items()[0].text, "buy milk");
    assert_eq!(session.items(), authoritative(&db).as_slice());

    // The input was not cleared; submitting again creates a second item.
    let next = format!("{} and eggs", form.input());
    form.set_input(next);
    session.perform(&form.submit());
    assert_eq!(session.items().len(), 2);

    // Update the first row through its surface.
    let first = session.items()[0].clone();
    let mut surfaces = UpdateSurfaces::new();
    surfaces.toggle(&first);
    let control = surfaces.get_mut(&SurfaceKey::for_item(&first.id)).unwrap();
    control.set_draft("buy oat milk");
    let mutation = control.confirm().unwrap();
    assert!(session.perform(&mutation).is_applied());
    assert_eq!(session.items()[0], TodoItem::new(first.id.clone(), "buy oat milk"));
    assert_eq!(session.items(), authoritative(&db).as_slice());

    // Delete it.
    assert!(session.perform(&DeleteControl::new(&first.id).confirm()).is_applied());
    assert_eq!(session.items().len(), 1);
    assert_eq!(session.items(), authoritative(&db).as_slice());

    // Deleting again is rejected, yet the list is still refreshed.
    let before = session.list().fetches_applied();
    let outcome = session.perform(&DeleteControl::new(&first.id).confirm());
    assert!(!outcome.is_applied());
    assert_eq!(session.list().fetches_applied(), before + 1);
}

#[test]
fn list_tracks_server_after_mixed_operations() {
    let (db, url) = start_server();
    let mut session = Session::new(TodoClient::new(&url), UreqTransport::new());
    session.start(0, Duration::ZERO).unwrap();

    let mut form = CreationForm::new(true);
    for text in ["a", "", "  ", "d"] {
        form.set_input(text);
        session.perform(&form.submit());
        assert_eq!(session.items(), authoritative(&db).as_slice());
    }
    assert_eq!(session.items().len(), 4);

    let ids: Vec<String> = session.items().iter().map(|i| i.id.clone()).collect();
    session.perform(&DeleteControl::new(&ids[1]).confirm());
    session.perform(&todo_core::Mutation::Update {
        id: ids[3].clone(),
        text: "dd".to_string(),
    });
    session.perform(&todo_core::Mutation::Update {
        id: "missing".to_string(),
        text: "x".to_string(),
    });

    let texts: Vec<&str> = session.items().iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, ["a", "  ", "dd"]);
    assert_eq!(session.items(), authoritative(&db).as_slice());
}

#[test]
fn unreachable_server_keeps_list_and_reports_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut session = Session::new(TodoClient::new(&format!("http://{addr}")), UreqTransport::new());

    let err = session.start(1, Duration::ZERO).unwrap_err();
    assert!(matches!(err, todo_core::ClientError::Transport(_)));
    assert!(session.items().is_empty());

    let outcome = session.perform(&DeleteControl::new("1").confirm());
    assert!(matches!(outcome, todo_core::MutationOutcome::Unreachable(_)));
}
