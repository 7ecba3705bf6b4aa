//! Best-effort discovery of a LAN-reachable address to advertise.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use log::debug;

/// Address used to learn which interface outbound traffic leaves through.
/// connect() on a UDP socket only selects a route; no packet is ever sent.
const ROUTE_PROBE_ADDR: &str = "10.254.254.254:1";

/// Returns the IPv4 address of the interface that outbound traffic would
/// use, falling back to loopback when no route is available.
pub fn discover_local_ip() -> IpAddr {
    match outbound_interface_ip() {
        Some(ip) => ip,
        None => {
            debug!("No routable interface found, advertising loopback");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

fn outbound_interface_ip() -> Option<IpAddr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0)).ok()?;
    socket.connect(ROUTE_PROBE_ADDR).ok()?;
    let ip = socket.local_addr().ok()?.ip();
    if ip.is_unspecified() {
        return None;
    }
    Some(ip)
}
