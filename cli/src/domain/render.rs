//! Generated artifacts — pure functions, no I/O, no async.
//!
//! Each function accepts a descriptor and returns a `String` containing the
//! artifact content. The caller is responsible for writing to disk.

#![allow(clippy::format_push_string)]

use std::path::PathBuf;

use crate::domain::account::SystemIdentity;
use crate::domain::deps::ResolvedCommand;

/// Everything a systemd unit needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescriptor {
    pub app_name: String,
    pub exec_start: String,
    pub env: Vec<String>,
    pub working_dir: PathBuf,
    pub owner: SystemIdentity,
}

impl UnitDescriptor {
    #[must_use]
    pub fn new(
        app_name: &str,
        run: &ResolvedCommand,
        env: &[String],
        working_dir: PathBuf,
        owner: SystemIdentity,
    ) -> Self {
        Self {
            app_name: app_name.to_string(),
            exec_start: run.command_line(),
            env: env.to_vec(),
            working_dir,
            owner,
        }
    }
}

/// Everything an nginx site needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyDescriptor {
    pub host: String,
    pub port: u16,
    pub upstream_host: String,
    pub cert_dir: PathBuf,
    pub log_dir: PathBuf,
}

/// Generate `<host>.service` content.
///
/// Returns the unit file string — does NOT write to disk.
#[must_use]
pub fn systemd_unit(unit: &UnitDescriptor) -> String {
    let name = &unit.app_name;

    let mut out = String::new();
    out.push_str("# Generated by instllr - DO NOT EDIT\n");
    out.push_str("[Unit]\n");
    out.push_str(&format!("Description={name}\n"));
    out.push_str("After=network-online.target\n");
    out.push_str("Wants=network-online.target\n");
    out.push('\n');
    out.push_str("[Service]\n");
    out.push_str("Type=simple\n");
    out.push_str(&format!("User={}\n", unit.owner.uid));
    out.push_str(&format!("Group={}\n", unit.owner.gid));
    out.push_str(&format!(
        "WorkingDirectory={}\n",
        unit.working_dir.display()
    ));
    for assignment in &unit.env {
        out.push_str(&format!("Environment={}\n", quote_environment(assignment)));
    }
    out.push_str(&format!("ExecStart={}\n", unit.exec_start));
    out.push_str("Restart=always\n");
    out.push_str("RestartSec=5\n");
    out.push('\n');
    out.push_str("[Install]\n");
    out.push_str("WantedBy=multi-user.target\n");

    out
}

/// Quote one `KEY=VALUE` for an `Environment=` line.
///
/// systemd expands `%` specifiers and honours C-style escapes inside quotes.
fn quote_environment(assignment: &str) -> String {
    let escaped = assignment
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('%', "%%");
    format!("\"{escaped}\"")
}

/// Generate `<host>.conf` content — HTTP to HTTPS redirect plus a TLS
/// server block proxying to the local port.
///
/// Returns the site string — does NOT write to disk.
#[must_use]
pub fn nginx_site(proxy: &ProxyDescriptor) -> String {
    let host = &proxy.host;
    let certs = proxy.cert_dir.display();
    let logs = proxy.log_dir.display();

    let mut out = String::new();
    out.push_str("# Generated by instllr - DO NOT EDIT\n");
    out.push_str("server {\n");
    out.push_str("    listen 80;\n");
    out.push_str("    listen [::]:80;\n");
    out.push_str(&format!("    server_name {host};\n"));
    out.push_str("    return 301 https://$host$request_uri;\n");
    out.push_str("}\n");
    out.push('\n');
    out.push_str("server {\n");
    out.push_str("    listen 443 ssl;\n");
    out.push_str("    listen [::]:443 ssl;\n");
    out.push_str(&format!("    server_name {host};\n"));
    out.push('\n');
    out.push_str(&format!("    ssl_certificate {certs}/fullchain.pem;\n"));
    out.push_str(&format!("    ssl_certificate_key {certs}/privkey.pem;\n"));
    out.push('\n');
    out.push_str(&format!("    access_log {logs}/access.log;\n"));
    out.push_str(&format!("    error_log {logs}/error.log;\n"));
    out.push('\n');
    out.push_str("    location / {\n");
    out.push_str(&format!(
        "        proxy_pass http://{}:{};\n",
        proxy.upstream_host, proxy.port
    ));
    out.push_str("        proxy_http_version 1.1;\n");
    out.push_str("        proxy_set_header Host $host;\n");
    out.push_str("        proxy_set_header X-Real-IP $remote_addr;\n");
    out.push_str("        proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;\n");
    out.push_str("        proxy_set_header X-Forwarded-Proto $scheme;\n");
    out.push_str("        proxy_set_header Upgrade $http_upgrade;\n");
    out.push_str("        proxy_set_header Connection \"upgrade\";\n");
    out.push_str("    }\n");
    out.push_str("}\n");

    out
}
