//! Score and player persistence.
//!
//! Two backends behind one façade: a remote HTTP service reached from a
//! background thread, and a local JSON store used when the service is
//! unreachable (or chosen outright). Scene code never blocks; it requests,
//! then reads cached results the frame they arrive.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request};
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(4);
const TOP_SCORES_CAP: usize = 50;

pub fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

//
// Wire types
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: u64,
    pub name: String,
    pub high_score: u32,
    pub last_played: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub is_high_score: bool,
    pub high_score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    pub date: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePlayerRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitScoreRequest {
    player_id: u64,
    score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// The service could not be reached at all.
    Unreachable(String),
    /// The service answered with something we could not use.
    BadResponse(String),
    /// Local store I/O failed.
    Io(String),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::Unreachable(msg) => write!(f, "score service unreachable: {msg}"),
            ScoreError::BadResponse(msg) => write!(f, "score service answered badly: {msg}"),
            ScoreError::Io(msg) => write!(f, "score store failed: {msg}"),
        }
    }
}

impl std::error::Error for ScoreError {}

impl From<io::Error> for ScoreError {
    fn from(err: io::Error) -> Self {
        ScoreError::Io(err.to_string())
    }
}

//
// Remote backend
//

#[derive(Debug)]
enum ScoreCmd {
    ConnectPlayer { name: String },
    SubmitScore { player_id: u64, score: u32 },
    FetchTopScores,
}

#[derive(Debug)]
pub enum ScoreEvent {
    PlayerReady(Result<PlayerRecord, ScoreError>),
    ScoreSubmitted(Result<SubmitOutcome, ScoreError>),
    TopScores(Result<Vec<ScoreEntry>, ScoreError>),
}

/// Talks HTTP on its own thread; the game thread only touches channels.
pub struct HttpScoreClient {
    cmd_tx: mpsc::UnboundedSender<ScoreCmd>,
    event_rx: std_mpsc::Receiver<ScoreEvent>,
}

impl HttpScoreClient {
    pub fn start(base_url: String) -> Self {
        let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<ScoreCmd>();
        let (event_tx, event_rx) = std_mpsc::channel::<ScoreEvent>();

        thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("score client tokio runtime");
            rt.block_on(async move {
                let client: Client<HttpConnector, Full<Bytes>> =
                    Client::builder(TokioExecutor::new()).build_http();
                let base = base_url.trim_end_matches('/').to_string();

                while let Some(cmd) = cmd_rx.recv().await {
                    let event = match cmd {
                        ScoreCmd::ConnectPlayer { name } => {
                            ScoreEvent::PlayerReady(create_or_fetch(&client, &base, &name).await)
                        }
                        ScoreCmd::SubmitScore { player_id, score } => ScoreEvent::ScoreSubmitted(
                            submit_score(&client, &base, player_id, score).await,
                        ),
                        ScoreCmd::FetchTopScores => {
                            ScoreEvent::TopScores(fetch_top_scores(&client, &base).await)
                        }
                    };
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            });
        });

        Self { cmd_tx, event_rx }
    }

    fn request(&self, cmd: ScoreCmd) {
        let _ = self.cmd_tx.send(cmd);
    }

    fn poll(&self) -> Option<ScoreEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn create_or_fetch(
    client: &Client<HttpConnector, Full<Bytes>>,
    base: &str,
    name: &str,
) -> Result<PlayerRecord, ScoreError> {
    let body = serde_json::to_string(&CreatePlayerRequest { name })
        .map_err(|e| ScoreError::BadResponse(e.to_string()))?;
    request_json(client, Method::POST, &format!("{base}/api/players"), Some(body)).await
}

async fn submit_score(
    client: &Client<HttpConnector, Full<Bytes>>,
    base: &str,
    player_id: u64,
    score: u32,
) -> Result<SubmitOutcome, ScoreError> {
    let body = serde_json::to_string(&SubmitScoreRequest { player_id, score })
        .map_err(|e| ScoreError::BadResponse(e.to_string()))?;
    request_json(client, Method::POST, &format!("{base}/api/scores"), Some(body)).await
}

async fn fetch_top_scores(
    client: &Client<HttpConnector, Full<Bytes>>,
    base: &str,
) -> Result<Vec<ScoreEntry>, ScoreError> {
    request_json(client, Method::GET, &format!("{base}/api/scores/top"), None).await
}

async fn request_json<T: DeserializeOwned>(
    client: &Client<HttpConnector, Full<Bytes>>,
    method: Method,
    url: &str,
    body: Option<String>,
) -> Result<T, ScoreError> {
    let request = Request::builder()
        .method(method)
        .uri(url)
        .header(hyper::header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body.unwrap_or_default())))
        .map_err(|e| ScoreError::BadResponse(e.to_string()))?;

    let response = tokio::time::timeout(REQUEST_TIMEOUT, client.request(request))
        .await
        .map_err(|_| ScoreError::Unreachable("timed out".to_string()))?
        .map_err(|e| ScoreError::Unreachable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScoreError::BadResponse(format!("status {status}")));
    }

    let bytes = response
        .into_body()
        .collect()
        .await
        .map_err(|e| ScoreError::Unreachable(e.to_string()))?
        .to_bytes();
    serde_json::from_slice(&bytes).map_err(|e| ScoreError::BadResponse(e.to_string()))
}

//
// Local backend
//

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreFile {
    #[serde(default)]
    players: Vec<PlayerRecord>,
    #[serde(default)]
    scores: Vec<ScoreEntry>,
}

/// Offline fallback: one JSON file holding players and recent scores.
#[derive(Debug, Clone)]
pub struct LocalScoreStore {
    path: PathBuf,
}

impl LocalScoreStore {
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("SIMON_SCORES_PATH") {
            return Self {
                path: PathBuf::from(explicit),
            };
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("simon");
        path.push("scores.json");
        Self { path }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    fn read(&self) -> ScoreFile {
        let Ok(bytes) = fs::read(&self.path) else {
            return ScoreFile::default();
        };
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    fn write(&self, file: &ScoreFile) -> Result<(), ScoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(file)
            .map_err(|e| ScoreError::Io(e.to_string()))?;
        fs::write(&self.path, text)?;
        Ok(())
    }

    pub fn create_or_fetch_player(&self, name: &str) -> Result<PlayerRecord, ScoreError> {
        let mut file = self.read();
        if let Some(existing) = file.players.iter().find(|p| p.name == name) {
            return Ok(existing.clone());
        }

        let record = PlayerRecord {
            id: file.players.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            name: name.to_string(),
            high_score: 0,
            last_played: now_unix(),
        };
        file.players.push(record.clone());
        self.write(&file)?;
        Ok(record)
    }

    pub fn submit_score(&self, player_id: u64, score: u32) -> Result<SubmitOutcome, ScoreError> {
        let mut file = self.read();
        let Some(player) = file.players.iter_mut().find(|p| p.id == player_id) else {
            return Err(ScoreError::BadResponse(format!(
                "unknown player id {player_id}"
            )));
        };

        let is_high_score = score > player.high_score;
        if is_high_score {
            player.high_score = score;
        }
        player.last_played = now_unix();
        let outcome = SubmitOutcome {
            is_high_score,
            high_score: player.high_score,
        };

        file.scores.push(ScoreEntry {
            name: player.name.clone(),
            score,
            date: now_unix(),
        });
        file.scores.sort_by(|a, b| b.score.cmp(&a.score));
        file.scores.truncate(TOP_SCORES_CAP);

        self.write(&file)?;
        Ok(outcome)
    }

    pub fn top_scores(&self) -> Result<Vec<ScoreEntry>, ScoreError> {
        let mut scores = self.read().scores;
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(scores)
    }
}

//
// Façade
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// No session requested yet.
    Idle,
    /// Waiting for the remote service to answer.
    Connecting,
    /// Remote service answered; scores go to the server.
    Online,
    /// Using the local store.
    Local,
    /// Remote service failed; the UI offers retry / offline.
    Failed,
}

enum Backend {
    Remote(HttpScoreClient),
    Local(LocalScoreStore),
}

/// What the scenes actually talk to: request methods plus cached results,
/// refreshed by `poll()` once per frame.
pub struct Scoreboard {
    backend: Backend,
    connectivity: Connectivity,
    pending_name: Option<String>,
    player: Option<PlayerRecord>,
    submit_outcome: Option<SubmitOutcome>,
    top_scores: Option<Vec<ScoreEntry>>,
    top_scores_pending: bool,
    last_error: Option<ScoreError>,
}

impl Scoreboard {
    pub fn remote(base_url: String) -> Self {
        Self::with_backend(Backend::Remote(HttpScoreClient::start(base_url)))
    }

    pub fn local(store: LocalScoreStore) -> Self {
        Self::with_backend(Backend::Local(store))
    }

    fn with_backend(backend: Backend) -> Self {
        Self {
            backend,
            connectivity: Connectivity::Idle,
            pending_name: None,
            player: None,
            submit_outcome: None,
            top_scores: None,
            top_scores_pending: false,
            last_error: None,
        }
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn player(&self) -> Option<&PlayerRecord> {
        self.player.as_ref()
    }

    pub fn submit_outcome(&self) -> Option<SubmitOutcome> {
        self.submit_outcome
    }

    pub fn top_scores(&self) -> Option<&[ScoreEntry]> {
        self.top_scores.as_deref()
    }

    pub fn top_scores_pending(&self) -> bool {
        self.top_scores_pending
    }

    pub fn last_error(&self) -> Option<&ScoreError> {
        self.last_error.as_ref()
    }

    /// Creates or fetches the player record for `name`.
    pub fn begin_session(&mut self, name: &str) {
        self.pending_name = Some(name.to_string());
        self.last_error = None;
        match &self.backend {
            Backend::Remote(client) => {
                self.connectivity = Connectivity::Connecting;
                client.request(ScoreCmd::ConnectPlayer {
                    name: name.to_string(),
                });
            }
            Backend::Local(store) => match store.create_or_fetch_player(name) {
                Ok(record) => {
                    self.player = Some(record);
                    self.connectivity = Connectivity::Local;
                }
                Err(err) => {
                    self.last_error = Some(err);
                    self.connectivity = Connectivity::Failed;
                }
            },
        }
    }

    /// Re-runs the last `begin_session` against the remote service.
    pub fn retry(&mut self) {
        if let Some(name) = self.pending_name.clone() {
            self.begin_session(&name);
        }
    }

    /// Gives up on the remote service and switches to the local store,
    /// re-running the pending session against it.
    pub fn go_local(&mut self, store: LocalScoreStore) {
        self.backend = Backend::Local(store);
        if let Some(name) = self.pending_name.clone() {
            self.begin_session(&name);
        } else {
            self.connectivity = Connectivity::Local;
        }
    }

    pub fn submit_score(&mut self, score: u32) {
        self.submit_outcome = None;
        let Some(player_id) = self.player.as_ref().map(|p| p.id) else {
            return;
        };
        let result = match &self.backend {
            Backend::Remote(client) => {
                client.request(ScoreCmd::SubmitScore { player_id, score });
                return;
            }
            Backend::Local(store) => store.submit_score(player_id, score),
        };
        match result {
            Ok(outcome) => self.apply_submit_outcome(outcome),
            Err(err) => self.last_error = Some(err),
        }
    }

    pub fn refresh_top_scores(&mut self) {
        self.top_scores_pending = true;
        match &self.backend {
            Backend::Remote(client) => client.request(ScoreCmd::FetchTopScores),
            Backend::Local(store) => {
                match store.top_scores() {
                    Ok(scores) => self.top_scores = Some(scores),
                    Err(err) => self.last_error = Some(err),
                }
                self.top_scores_pending = false;
            }
        }
    }

    /// Drains backend events into the caches. Called once per frame by the
    /// scene director.
    pub fn poll(&mut self) {
        let mut events = Vec::new();
        if let Backend::Remote(client) = &self.backend {
            while let Some(event) = client.poll() {
                events.push(event);
            }
        }
        for event in events {
            self.apply_event(event);
        }
    }

    fn apply_event(&mut self, event: ScoreEvent) {
        match event {
            ScoreEvent::PlayerReady(Ok(record)) => {
                self.player = Some(record);
                self.connectivity = Connectivity::Online;
            }
            ScoreEvent::PlayerReady(Err(err)) => {
                self.last_error = Some(err);
                self.connectivity = Connectivity::Failed;
            }
            ScoreEvent::ScoreSubmitted(Ok(outcome)) => {
                self.apply_submit_outcome(outcome);
            }
            ScoreEvent::ScoreSubmitted(Err(err)) => {
                self.last_error = Some(err);
            }
            ScoreEvent::TopScores(Ok(scores)) => {
                self.top_scores = Some(scores);
                self.top_scores_pending = false;
            }
            ScoreEvent::TopScores(Err(err)) => {
                self.last_error = Some(err);
                self.top_scores_pending = false;
            }
        }
    }

    fn apply_submit_outcome(&mut self, outcome: SubmitOutcome) {
        self.submit_outcome = Some(outcome);
        if let Some(player) = self.player.as_mut() {
            player.high_score = player.high_score.max(outcome.high_score);
            player.last_played = now_unix();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> LocalScoreStore {
        let path = std::env::temp_dir().join(format!("simon-scores-{tag}.json"));
        let _ = fs::remove_file(&path);
        LocalScoreStore::at(path)
    }

    #[test]
    fn player_record_uses_camel_case_on_the_wire() {
        let record = PlayerRecord {
            id: 3,
            name: "ADA".to_string(),
            high_score: 9,
            last_played: 1_700_000_000,
        };
        let json = serde_json::to_string(&record).expect("serialize player");
        assert!(json.contains("\"highScore\":9"));
        assert!(json.contains("\"lastPlayed\":1700000000"));

        let parsed: PlayerRecord = serde_json::from_str(&json).expect("parse player");
        assert_eq!(parsed, record);
    }

    #[test]
    fn submit_outcome_round_trips() {
        let json = r#"{"isHighScore":true,"highScore":5}"#;
        let outcome: SubmitOutcome = serde_json::from_str(json).expect("parse outcome");
        assert!(outcome.is_high_score);
        assert_eq!(outcome.high_score, 5);
    }

    #[test]
    fn local_store_creates_then_fetches_the_same_player() {
        let store = temp_store("create-fetch");
        let first = store.create_or_fetch_player("ADA").expect("create");
        let second = store.create_or_fetch_player("ADA").expect("fetch");
        assert_eq!(first.id, second.id);

        let other = store.create_or_fetch_player("LIN").expect("create other");
        assert_ne!(other.id, first.id);
    }

    #[test]
    fn local_store_reports_high_scores_strictly_greater() {
        let store = temp_store("high-scores");
        let player = store.create_or_fetch_player("ADA").expect("create");

        let first = store.submit_score(player.id, 3).expect("submit 3");
        assert!(first.is_high_score);
        assert_eq!(first.high_score, 3);

        let equal = store.submit_score(player.id, 3).expect("submit equal");
        assert!(!equal.is_high_score);

        let higher = store.submit_score(player.id, 5).expect("submit 5");
        assert!(higher.is_high_score);
        assert_eq!(higher.high_score, 5);

        let lower = store.submit_score(player.id, 1).expect("submit lower");
        assert!(!lower.is_high_score);
        assert_eq!(lower.high_score, 5);
    }

    #[test]
    fn local_store_rejects_unknown_players() {
        let store = temp_store("unknown-player");
        assert!(matches!(
            store.submit_score(999, 1),
            Err(ScoreError::BadResponse(_))
        ));
    }

    #[test]
    fn local_top_scores_are_sorted_descending() {
        let store = temp_store("top-sorted");
        let player = store.create_or_fetch_player("ADA").expect("create");
        for score in [2, 9, 5] {
            store.submit_score(player.id, score).expect("submit");
        }
        let top = store.top_scores().expect("top scores");
        let values: Vec<u32> = top.iter().map(|e| e.score).collect();
        assert_eq!(values, vec![9, 5, 2]);
    }

    #[test]
    fn scoreboard_local_session_flow() {
        let mut board = Scoreboard::local(temp_store("facade-flow"));
        assert_eq!(board.connectivity(), Connectivity::Idle);

        board.begin_session("ADA");
        assert_eq!(board.connectivity(), Connectivity::Local);
        assert_eq!(board.player().map(|p| p.name.as_str()), Some("ADA"));

        board.submit_score(4);
        let outcome = board.submit_outcome().expect("submit outcome cached");
        assert!(outcome.is_high_score);
        assert_eq!(board.player().map(|p| p.high_score), Some(4));

        board.refresh_top_scores();
        assert!(!board.top_scores_pending());
        assert_eq!(board.top_scores().map(<[ScoreEntry]>::len), Some(1));
    }

    #[test]
    fn submitting_without_a_player_is_ignored() {
        let mut board = Scoreboard::local(temp_store("no-player"));
        board.submit_score(3);
        assert_eq!(board.submit_outcome(), None);
    }

    #[test]
    fn score_error_displays_its_category() {
        let err = ScoreError::Unreachable("connection refused".to_string());
        assert!(err.to_string().contains("unreachable"));
    }
}
