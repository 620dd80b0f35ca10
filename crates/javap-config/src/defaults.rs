//! Fallback values applied when an environment variable is unset.
//!
//! # Design
//! - Every default lives here.
//! - Tool locations assume the binaries are on `PATH`.

use std::net::{IpAddr, Ipv4Addr};

pub(crate) const BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub(crate) const HTTP_PORT: u16 = 8080;
pub(crate) const LOG_LEVEL: &str = "info";
pub(crate) const DB_MAX_CONNECTIONS: u32 = 5;
pub(crate) const PROCESS_TIMEOUT_SECS: u64 = 10;

pub(crate) const JAVAC: &str = "javac";
pub(crate) const ECJ: &str = "ecj";
pub(crate) const KOTLINC: &str = "kotlinc";
pub(crate) const SCALAC: &str = "scalac";
pub(crate) const JAVAP: &str = "javap";
pub(crate) const JAVA: &str = "java";
pub(crate) const PROCYON_JAR: &str = "/opt/procyon/procyon-decompiler.jar";
