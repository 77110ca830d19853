use std::net::IpAddr;

use anyhow::Context;
use mdns_sd::{ServiceDaemon, ServiceInfo};

/// Announces `_<instance_name>._tcp.local.` on `ip:port`. Keep the returned daemon alive.
pub fn register_msdn(ip: IpAddr, port: u16, instance_name: &str) -> anyhow::Result<ServiceDaemon> {
    let mdns = ServiceDaemon::new().context("failed to create mDNS daemon")?;

    let service_type = format!("_{instance_name}._tcp.local.");
    let host_name = format!("{ip}.local.");
    let properties = [("path", "/ws"), ("protocol", "json")];

    let my_service = ServiceInfo::new(
        &service_type,
        instance_name,
        &host_name,
        ip,
        port,
        &properties[..],
    ).context("invalid mDNS service info")?;

    mdns.register(my_service).context("failed to register our service")?;
    Ok(mdns)
}
