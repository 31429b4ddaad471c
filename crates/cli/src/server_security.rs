use anyhow::{bail, Context as AnyhowContext, Result};
use std::net::SocketAddr;

/// Resolves `bind` and rejects any address that would put the search API on
/// the network unless `public` is set.
pub(crate) async fn resolve_guarded_bind_addrs(
    bind: &str,
    public: bool,
) -> Result<Vec<SocketAddr>> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host(bind)
        .await
        .with_context(|| format!("Cannot resolve --bind {bind}"))?
        .collect();
    if addrs.is_empty() {
        bail!("--bind {bind} did not resolve to any address");
    }

    if !public {
        if let Some(exposed) = first_exposed(&addrs) {
            bail!(
                "--bind {bind} resolves to {exposed}, which is reachable from other hosts; \
                 rerun serve-http with --public to allow it"
            );
        }
    }
    Ok(addrs)
}

fn first_exposed(addrs: &[SocketAddr]) -> Option<SocketAddr> {
    addrs.iter().copied().find(|addr| !addr.ip().is_loopback())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn loopback_binds_need_no_flag() {
        let addrs = resolve_guarded_bind_addrs("127.0.0.1:0", false).await.unwrap();
        assert!(addrs.iter().all(|addr| addr.ip().is_loopback()));
    }

    #[tokio::test]
    async fn wildcard_bind_requires_public() {
        let err = resolve_guarded_bind_addrs("0.0.0.0:0", false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("rerun serve-http with --public"));

        resolve_guarded_bind_addrs("0.0.0.0:0", true).await.unwrap();
    }

    #[test]
    fn first_exposed_skips_loopback() {
        let loopback: SocketAddr = "127.0.0.1:7700".parse().unwrap();
        let wildcard: SocketAddr = "0.0.0.0:7700".parse().unwrap();
        assert_eq!(first_exposed(&[loopback]), None);
        assert_eq!(first_exposed(&[loopback, wildcard]), Some(wildcard));
    }
}
