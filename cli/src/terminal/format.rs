use std::net::{IpAddr, Ipv6Addr};

use colored::*;
use ingestr_core::registry::InterfaceEntry;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn ipv6_to_type_str(ipv6_addr: &Ipv6Addr) -> &'static str {
    if is_global_unicast(ipv6_addr) {
        return "GUA";
    }
    if ipv6_addr.is_unique_local() {
        return "ULA";
    }
    if ipv6_addr.is_unicast_link_local() {
        return "LLA";
    }
    "IPv6"
}

// 2000::/3
fn is_global_unicast(ipv6_addr: &Ipv6Addr) -> bool {
    let first_byte = ipv6_addr.octets()[0];
    (0x20..=0x3F).contains(&first_byte)
}

pub fn ip_to_detail(ip: IpAddr) -> Detail {
    match ip {
        IpAddr::V4(ipv4_addr) => (
            String::from("IPv4"),
            ipv4_addr.to_string().color(colors::IPV4_ADDR),
        ),
        IpAddr::V6(ipv6_addr) => (
            String::from(ipv6_to_type_str(&ipv6_addr)),
            ipv6_addr.to_string().color(colors::IPV6_ADDR),
        ),
    }
}

/// Address line plus, when known, the hostnames of one interface.
pub fn interface_to_details(interface: &InterfaceEntry) -> Vec<Detail> {
    let address: Detail = match (interface.ipv4, interface.ipv6) {
        (Some(v4), _) => ip_to_detail(IpAddr::V4(v4)),
        (None, Some(v6)) => ip_to_detail(IpAddr::V6(v6)),
        (None, None) => (
            String::from("Addr"),
            interface.address.color(colors::TEXT_DEFAULT),
        ),
    };

    let mut details = vec![address];
    if !interface.hostnames.is_empty() {
        details.push((
            String::from("Names"),
            interface.hostnames.join(", ").color(colors::HOSTNAME),
        ));
    }
    details
}
