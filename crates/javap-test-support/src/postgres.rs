//! Disposable Postgres databases for integration tests.
//!
//! Set `JAVAP_TEST_DATABASE_URL` to reuse an existing server; otherwise the
//! local `initdb`/`postgres`/`pg_isready` binaries are used to spawn one.
//! Suites should skip when [`start_postgres`] fails.

use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::str::FromStr;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow, bail};
use postgres::NoTls;
use url::Url;

const DATABASE_URL_ENV: &str = "JAVAP_TEST_DATABASE_URL";
const BINARY_DIRS: &[&str] = &[
    "/usr/lib/postgresql/16/bin",
    "/opt/homebrew/opt/postgresql@16/bin",
    "/usr/local/bin",
];

/// A freshly created database, dropped (and its server stopped) on drop.
pub struct TestDatabase {
    connection_string: String,
    admin_url: String,
    database: String,
    _server: Option<LocalServer>,
}

struct LocalServer {
    process: Child,
    data_dir: PathBuf,
}

impl TestDatabase {
    /// Connection string for `sqlx` or any other Postgres client.
    #[must_use]
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        let _ = run_admin(
            &self.admin_url,
            format!("DROP DATABASE IF EXISTS \"{}\"", self.database),
        );
    }
}

impl Drop for LocalServer {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
        let _ = fs::remove_dir_all(&self.data_dir);
    }
}

/// Create an empty database on an external or locally spawned server.
///
/// # Errors
///
/// Returns an error when no external URL is configured and a local server
/// cannot be started, or when the database cannot be created.
pub fn start_postgres() -> Result<TestDatabase> {
    if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
        return create_database(&url, None);
    }

    let (server, port) = spawn_local_server()?;
    create_database(
        &format!("postgres://postgres@127.0.0.1:{port}/postgres"),
        Some(server),
    )
}

fn create_database(base_url: &str, server: Option<LocalServer>) -> Result<TestDatabase> {
    let parsed = Url::parse(base_url).context("invalid postgres connection url")?;
    let database = unique_name("javap_test");

    let mut admin = parsed.clone();
    admin.set_path("/postgres");
    let admin_url = admin.to_string();
    run_admin(&admin_url, format!("CREATE DATABASE \"{database}\""))?;

    let mut target = parsed;
    target.set_path(&format!("/{database}"));
    Ok(TestDatabase {
        connection_string: target.to_string(),
        admin_url,
        database,
        _server: server,
    })
}

// The sync client spins its own runtime, so keep it off any async test thread.
fn run_admin(admin_url: &str, statement: String) -> Result<()> {
    let admin_url = admin_url.to_string();
    thread::spawn(move || -> Result<()> {
        let mut client = postgres::Config::from_str(&admin_url)?.connect(NoTls)?;
        client
            .simple_query(&statement)
            .map(|_| ())
            .with_context(|| format!("failed to run `{statement}`"))
    })
    .join()
    .unwrap_or_else(|_| Err(anyhow!("admin statement thread panicked")))
}

fn spawn_local_server() -> Result<(LocalServer, u16)> {
    let initdb = find_binary("initdb")?;
    let postgres = find_binary("postgres")?;
    let pg_isready = find_binary("pg_isready")?;

    let data_dir = PathBuf::from(".server_root/postgres").join(unique_name("javap-pg"));
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;
    let data_dir_str = data_dir
        .to_str()
        .context("data dir contains non-utf8 characters")?;

    let status = Command::new(&initdb)
        .args(["-D", data_dir_str, "--username=postgres", "--auth=trust"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("failed to run initdb")?;
    if !status.success() {
        bail!("initdb exited with failure status");
    }

    let port = TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .context("failed to reserve port")?
        .port();
    let process = Command::new(&postgres)
        .args(["-D", data_dir_str, "-p", &port.to_string(), "-h", "127.0.0.1"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("failed to start postgres process")?;
    let server = LocalServer { process, data_dir };

    wait_until_ready(&pg_isready, port)?;
    Ok((server, port))
}

fn find_binary(name: &str) -> Result<PathBuf> {
    let path_dirs = std::env::var_os("PATH")
        .map_or_else(Vec::new, |paths| std::env::split_paths(&paths).collect());
    BINARY_DIRS
        .iter()
        .map(PathBuf::from)
        .chain(path_dirs)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.exists())
        .ok_or_else(|| anyhow!("{name} binary is required for Postgres tests"))
}

fn wait_until_ready(pg_isready: &Path, port: u16) -> Result<()> {
    for _ in 0..30 {
        let ready = Command::new(pg_isready)
            .args(["-h", "127.0.0.1", "-p", &port.to_string(), "-U", "postgres"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success());
        if ready {
            return Ok(());
        }
        thread::sleep(Duration::from_millis(200));
    }
    bail!("postgres process did not become ready in time")
}

fn unique_name(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{prefix}_{}_{nanos}", std::process::id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_names_carry_prefix_and_differ() {
        let first = unique_name("javap_test");
        thread::sleep(Duration::from_millis(1));
        let second = unique_name("javap_test");
        assert!(first.starts_with("javap_test_"));
        assert_ne!(first, second);
    }

    #[test]
    fn missing_binary_is_reported() {
        let err = find_binary("definitely-not-a-postgres-binary").err();
        assert!(err.is_some());
    }
}
