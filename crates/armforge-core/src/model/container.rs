use serde::Deserialize;

use super::{Location, ResourceName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum OsType {
    #[default]
    Linux,
    Windows,
}

impl OsType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::Windows => "Windows",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum RestartPolicy {
    #[default]
    Always,
    Never,
    OnFailure,
}

impl RestartPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "Always",
            Self::Never => "Never",
            Self::OnFailure => "OnFailure",
        }
    }
}

/// Whether the group's IP address is reachable from the internet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum IpAddressKind {
    #[default]
    Public,
    Private,
}

impl IpAddressKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Private => "Private",
        }
    }
}

/// Group ports are exposed over TCP only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Tcp,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "TCP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortBinding {
    pub protocol: Protocol,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IpAddress {
    pub kind: IpAddressKind,
    pub ports: Vec<PortBinding>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerInstance {
    pub name: ResourceName,
    pub image: String,
    pub ports: Vec<u16>,
    pub cpu: u32,
    pub memory_gb: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContainerGroup {
    pub name: ResourceName,
    pub location: Location,
    pub os_type: OsType,
    pub restart_policy: RestartPolicy,
    pub ip_address: IpAddress,
    pub containers: Vec<ContainerInstance>,
}

impl ContainerGroup {
    /// Append a container, exposing any of its ports the group does not
    /// already expose. Containers keep insertion order.
    pub fn add_container(&mut self, instance: ContainerInstance) {
        for &port in &instance.ports {
            let exposed = self.ip_address.ports.iter().any(|b| b.port == port);
            if !exposed {
                self.ip_address.ports.push(PortBinding {
                    protocol: Protocol::Tcp,
                    port,
                });
            }
        }
        self.containers.push(instance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(name: &str, ports: &[u16]) -> ContainerInstance {
        ContainerInstance {
            name: name.into(),
            image: "nginx".into(),
            ports: ports.to_vec(),
            cpu: 1,
            memory_gb: 1.5,
        }
    }

    #[test]
    fn add_container_unions_ports_in_first_seen_order() {
        let mut group = ContainerGroup {
            name: "g".into(),
            location: Location::default(),
            os_type: OsType::Linux,
            restart_policy: RestartPolicy::Always,
            ip_address: IpAddress::default(),
            containers: Vec::new(),
        };
        group.add_container(instance("web", &[80, 443]));
        group.add_container(instance("sidecar", &[443, 8080]));

        let ports: Vec<u16> = group.ip_address.ports.iter().map(|b| b.port).collect();
        assert_eq!(ports, vec![80, 443, 8080]);
        assert_eq!(group.containers.len(), 2);
        assert_eq!(group.containers[1].name.as_str(), "sidecar");
    }
}
