//! Audit event type constants

pub const SSH_KEYPAIR_REGISTER: &str = "REGISTER.SSH.KEYPAIR";
pub const SSH_KEYPAIR_DELETE: &str = "DELETE.SSH.KEYPAIR";
pub const PROXY_DESTROY: &str = "PROXY.DESTROY";
pub const SSVM_DESTROY: &str = "SSVM.DESTROY";
pub const NET_IP_RELEASE: &str = "NET.IPRELEASE";
pub const TEMPLATE_UPDATE: &str = "TEMPLATE.UPDATE";
pub const ISO_UPDATE: &str = "ISO.UPDATE";
pub const CLUSTER_DELETE: &str = "CLUSTER.DELETE";
pub const STORAGE_POOL_DELETE: &str = "STORAGE.POOL.DELETE";

/// Every event type the engine can emit, in wire order
pub const ALL: &[&str] = &[
    SSH_KEYPAIR_REGISTER,
    SSH_KEYPAIR_DELETE,
    PROXY_DESTROY,
    SSVM_DESTROY,
    NET_IP_RELEASE,
    TEMPLATE_UPDATE,
    ISO_UPDATE,
    CLUSTER_DELETE,
    STORAGE_POOL_DELETE,
];
