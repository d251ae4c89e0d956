//! IPアドレス正規化ユーティリティ
//!
//! IPv4-mapped IPv6アドレスをIPv4に正規化し、
//! ローカルネットワークインターフェースのアドレスを列挙する

use std::net::{IpAddr, SocketAddr};

/// IPアドレスを正規化する
///
/// IPv4-mapped IPv6（::ffff:x.x.x.x）をIPv4に変換。
/// それ以外はそのまま返す。
pub fn normalize_ip(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V6(v6) => {
            if let Some(v4) = v6.to_ipv4_mapped() {
                IpAddr::V4(v4)
            } else {
                IpAddr::V6(v6)
            }
        }
        v4 => v4,
    }
}

/// SocketAddrのIPアドレス部分を正規化する（ポートは保持）
pub fn normalize_socket_addr(addr: &SocketAddr) -> SocketAddr {
    SocketAddr::new(normalize_ip(addr.ip()), addr.port())
}

/// ローカルインターフェース列挙の結果
///
/// 列挙は best-effort であり、途中で失敗しても取得済みのアドレスは保持する。
/// 呼び出し側は `error` を無視してもよい。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceScan {
    /// 取得できたアドレス（インターフェース順）
    pub addresses: Vec<String>,
    /// 列挙に失敗した場合のエラー内容
    pub error: Option<String>,
}

impl InterfaceScan {
    /// 失敗なく列挙できたかどうか
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// アドレス一覧を取り出す
    pub fn into_addresses(self) -> Vec<String> {
        self.addresses
    }
}

/// (インターフェース名, IP) の組をインターフェースの出現順にまとめる
///
/// OSによってはアドレスファミリーごとに列挙されるため、
/// 同一インターフェースのアドレスが隣り合うよう安定ソートする。
fn group_by_interface(entries: Vec<(String, IpAddr)>) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    for (name, _) in &entries {
        if !order.contains(name) {
            order.push(name.clone());
        }
    }

    let mut indexed: Vec<(usize, IpAddr)> = entries
        .into_iter()
        .map(|(name, ip)| {
            let rank = order.iter().position(|n| *n == name).unwrap_or(usize::MAX);
            (rank, ip)
        })
        .collect();
    indexed.sort_by_key(|(rank, _)| *rank);
    indexed.into_iter().map(|(_, ip)| ip.to_string()).collect()
}

/// ローカルネットワークインターフェースのIPアドレスを列挙する
#[cfg(unix)]
pub fn scan_local_addresses() -> InterfaceScan {
    use nix::ifaddrs::getifaddrs;

    let iter = match getifaddrs() {
        Ok(iter) => iter,
        Err(e) => {
            return InterfaceScan {
                addresses: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    };

    let mut entries = Vec::new();
    for ifaddr in iter {
        let Some(storage) = ifaddr.address else {
            continue;
        };
        // AF_PACKET などIP以外のアドレスファミリーは対象外
        if let Some(v4) = storage.as_sockaddr_in() {
            entries.push((ifaddr.interface_name, IpAddr::V4(v4.ip())));
        } else if let Some(v6) = storage.as_sockaddr_in6() {
            entries.push((ifaddr.interface_name, IpAddr::V6(v6.ip())));
        }
    }

    InterfaceScan {
        addresses: group_by_interface(entries),
        error: None,
    }
}

/// ローカルネットワークインターフェースのIPアドレスを列挙する
#[cfg(not(unix))]
pub fn scan_local_addresses() -> InterfaceScan {
    InterfaceScan {
        addresses: Vec::new(),
        error: Some("interface enumeration is not supported on this platform".to_string()),
    }
}
