pub mod knock;

use clap::Parser;
use knockr_common::config::{DEFAULT_DELAY_MS, DEFAULT_TIMEOUT_MS};
use knockr_common::network::family::AddressFamily;
use knockr_common::network::knock::Protocol;

#[derive(Parser, Debug)]
#[command(name = "knockr")]
#[command(version, about = "A port-knocking client.")]
pub struct CommandLine {
    /// How long to wait for each TCP knock, in milliseconds
    #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout: u64,

    /// Pause between knocks, in milliseconds
    #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay: u64,

    /// Knock with UDP instead of TCP when a port names no protocol
    #[arg(short, long)]
    pub udp: bool,

    /// Print every knock as it is sent
    #[arg(short, long)]
    pub verbose: bool,

    /// Only use an IPv4 address of the host
    #[arg(short = '4', long = "ipv4", conflicts_with = "ipv6")]
    pub ipv4: bool,

    /// Only use an IPv6 address of the host
    #[arg(short = '6', long = "ipv6")]
    pub ipv6: bool,

    /// Host name or IP address to knock on (IPv6 supported)
    pub host: String,

    /// Port(s) to knock on, in order, with an optional protocol (tcp, udp)
    #[arg(value_name = "PORT[:PROTOCOL]", required = true, num_args = 1..)]
    pub ports: Vec<String>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn default_protocol(&self) -> Protocol {
        if self.udp { Protocol::Udp } else { Protocol::Tcp }
    }

    pub fn family_preference(&self) -> Option<AddressFamily> {
        match (self.ipv4, self.ipv6) {
            (true, _) => Some(AddressFamily::Ipv4),
            (_, true) => Some(AddressFamily::Ipv6),
            _ => None,
        }
    }
}
