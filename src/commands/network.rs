use std::fs::{self, File};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::thread;
use std::time::{Duration, Instant};

use super::{format_bytes, Command, CommandError};
use crate::session::Session;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// `ping` - TCP connect probe with per-probe timing and summary statistics.
///
/// ICMP needs raw sockets, so reachability is judged by a TCP connection to
/// port 80 instead.
pub struct PingCommand;

impl Command for PingCommand {
    fn execute(&self, args: &[String], _session: &mut Session) -> Result<(), CommandError> {
        let host = match args.get(1) {
            Some(host) => host,
            None => {
                println!("usage: ping <host>");
                println!("   or: ping <host> <count>");
                return Ok(());
            }
        };
        let count: u32 = match args.get(2) {
            Some(raw) => raw
                .parse()
                .map_err(|_| CommandError::InvalidArguments(format!("bad probe count: {}", raw)))?,
            None => 4,
        };

        let addr: SocketAddr = match format!("{}:80", host).to_socket_addrs() {
            Ok(mut addrs) => match addrs.next() {
                Some(addr) => addr,
                None => {
                    println!("Ping request could not find host {}", host);
                    return Ok(());
                }
            },
            Err(_) => {
                println!("Ping request could not find host {}", host);
                return Ok(());
            }
        };

        println!("Pinging {} with {} probes...", host, count);
        println!();

        let mut successful = 0u32;
        let mut total_ms = 0u128;
        for attempt in 0..count {
            let start = Instant::now();
            match TcpStream::connect_timeout(&addr, PROBE_TIMEOUT) {
                Ok(_) => {
                    let elapsed = start.elapsed().as_millis();
                    println!("Reply from {} ({}): time={}ms", host, addr.ip(), elapsed);
                    successful += 1;
                    total_ms += elapsed;
                }
                Err(_) => println!("Request timed out."),
            }
            if attempt + 1 < count {
                thread::sleep(Duration::from_secs(1));
            }
        }

        println!();
        println!("--- {} ping statistics ---", host);
        if count > 0 {
            println!(
                "{} probes transmitted, {} received, {}% packet loss",
                count,
                successful,
                (count - successful) * 100 / count
            );
        }
        if successful > 0 {
            println!(
                "Average response time: {}ms",
                total_ms / u128::from(successful)
            );
        }
        Ok(())
    }
}

/// `wget` - download a URL into the working directory.
pub struct WgetCommand;

impl Command for WgetCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let url = match args.get(1) {
            Some(url) => url,
            None => {
                println!("usage: wget <url>");
                println!("   or: wget <url> <output-filename>");
                return Ok(());
            }
        };
        let mut file_name = match args.get(2) {
            Some(name) => name.clone(),
            None => url.rsplit('/').next().unwrap_or_default().to_string(),
        };
        if file_name.is_empty() {
            file_name = "index.html".to_string();
        }

        println!("Downloading: {}", url);
        println!("Saving to: {}", file_name);

        let download = || -> Result<Option<u64>, CommandError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(HTTP_TIMEOUT)
                .connect_timeout(HTTP_TIMEOUT)
                .build()?;
            let mut response = client.get(url.as_str()).send()?;
            if !response.status().is_success() {
                println!("Error: Server returned HTTP code {}", response.status().as_u16());
                return Ok(None);
            }
            let mut output = File::create(session.resolve(&file_name))?;
            let bytes = response.copy_to(&mut output)?;
            Ok(Some(bytes))
        };
        match download() {
            Ok(Some(bytes)) => {
                println!("Download complete: {} ({})", file_name, format_bytes(bytes))
            }
            Ok(None) => {}
            Err(e) => println!("Download failed: {}", e),
        }
        Ok(())
    }
}

/// `curl` - fetch a URL and print the body, or save it with `-o`.
pub struct CurlCommand;

impl Command for CurlCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        if args.len() < 2 {
            println!("usage: curl <url>");
            println!("   or: curl -o <filename> <url>");
            return Ok(());
        }

        let (file_name, url) = if args[1] == "-o" {
            match (args.get(2), args.get(3)) {
                (Some(name), Some(url)) => (Some(name.clone()), url.clone()),
                _ => {
                    println!("usage: curl -o <filename> <url>");
                    return Ok(());
                }
            }
        } else {
            (None, args[1].clone())
        };

        let fetch = || -> Result<(u16, String), CommandError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(HTTP_TIMEOUT)
                .connect_timeout(HTTP_TIMEOUT)
                .build()?;
            let response = client.get(url.as_str()).send()?;
            let status = response.status().as_u16();
            let body = response.text()?;
            Ok((status, body))
        };
        let (status, body) = match fetch() {
            Ok(result) => result,
            Err(e) => {
                println!("Error: {}", e);
                return Ok(());
            }
        };

        println!("HTTP Response Code: {}", status);
        match file_name {
            Some(name) => match fs::write(session.resolve(&name), &body) {
                Ok(()) => println!("Saved to: {}", name),
                Err(e) => println!("Error: {}", e),
            },
            None => {
                println!("\n--- Response Body ---");
                println!("{}", body);
            }
        }
        Ok(())
    }
}

/// `ifconfig` - summarize network interfaces.
///
/// Interface names and counters come from `/proc/net/dev`; the primary
/// outbound address is discovered with a connected UDP socket (no traffic is
/// sent).
pub struct IfconfigCommand;

impl Command for IfconfigCommand {
    fn execute(&self, _args: &[String], _session: &mut Session) -> Result<(), CommandError> {
        println!("Network Interfaces:");
        println!("==================");

        match fs::read_to_string("/proc/net/dev") {
            Ok(table) => {
                for line in table.lines().skip(2) {
                    let Some((name, counters)) = line.split_once(':') else {
                        continue;
                    };
                    let fields: Vec<&str> = counters.split_whitespace().collect();
                    let rx = fields.first().and_then(|f| f.parse::<u64>().ok()).unwrap_or(0);
                    let tx = fields.get(8).and_then(|f| f.parse::<u64>().ok()).unwrap_or(0);
                    println!("\nInterface: {}", name.trim());
                    println!("  RX: {}", format_bytes(rx));
                    println!("  TX: {}", format_bytes(tx));
                }
            }
            Err(_) => println!("ifconfig: interface details unavailable on this platform"),
        }

        match primary_address() {
            Some(addr) => println!("\nPrimary address: {}", addr),
            None => println!("\nPrimary address: unavailable"),
        }
        Ok(())
    }
}

fn primary_address() -> Option<std::net::IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip())
}
