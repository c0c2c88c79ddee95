//! Names used on the wire by the UCS Manager XML API.
//!
//! Every request is a single element named after the method; every reply
//! echoes that name and carries its results in named child sections.

/// Path of the single XML API endpoint on the manager.
pub const ENDPOINT_PATH: &str = "/nuova";

/// Wrapper element for a compiled filter inside a request.
pub const IN_FILTER: &str = "inFilter";

/// RPC method names.
pub mod method {
	pub const AAA_LOGIN: &str = "aaaLogin";
	pub const AAA_REFRESH: &str = "aaaRefresh";
	pub const AAA_LOGOUT: &str = "aaaLogout";

	pub const CONFIG_RESOLVE_CHILDREN: &str = "configResolveChildren";
	pub const CONFIG_RESOLVE_CLASS: &str = "configResolveClass";
	pub const CONFIG_RESOLVE_CLASSES: &str = "configResolveClasses";
	pub const CONFIG_RESOLVE_DN: &str = "configResolveDn";
	pub const CONFIG_RESOLVE_DNS: &str = "configResolveDns";
	pub const CONFIG_RESOLVE_PARENT: &str = "configResolveParent";
	pub const CONFIG_FIND_DNS_BY_CLASS_ID: &str = "configFindDnsByClassId";
	pub const CONFIG_SCOPE: &str = "configScope";
	pub const CONFIG_CONF_MO: &str = "configConfMo";
	pub const CONFIG_CONF_MOS: &str = "configConfMos";
	pub const CONFIG_CONF_MO_GROUP: &str = "configConfMoGroup";
	pub const CONFIG_ESTIMATE_IMPACT: &str = "configEstimateImpact";

	pub const ORG_RESOLVE_ELEMENTS: &str = "orgResolveElements";

	pub const LS_CLONE: &str = "lsClone";
	pub const LS_INSTANTIATE_TEMPLATE: &str = "lsInstantiateTemplate";
	pub const LS_INSTANTIATE_N_TEMPLATE: &str = "lsInstantiateNTemplate";
	pub const LS_INSTANTIATE_N_NAMED_TEMPLATE: &str = "lsInstantiateNNamedTemplate";

	/// Methods whose request carries a password and must never be logged.
	pub fn carries_credentials(method: &str) -> bool {
		matches!(method, AAA_LOGIN | AAA_REFRESH)
	}
}

/// Result section names found under the response atom.
pub mod section {
	pub const OUT_CONFIG: &str = "outConfig";
	pub const OUT_CONFIGS: &str = "outConfigs";
	pub const OUT_UNRESOLVED: &str = "outUnresolved";
	pub const OUT_DNS: &str = "outDns";
	pub const OUT_ACKABLES: &str = "outAckables";
	pub const OUT_OLD_ACKABLES: &str = "outOldAckables";
	pub const OUT_AFFECTED: &str = "outAffected";
	pub const OUT_OLD_AFFECTED: &str = "outOldAffected";
}

/// Payload element names appended to requests.
pub mod payload {
	pub const IN_CONFIG: &str = "inConfig";
	pub const IN_CONFIGS: &str = "inConfigs";
	pub const IN_DNS: &str = "inDns";
	pub const IN_IDS: &str = "inIds";
	pub const IN_NAME_SET: &str = "inNameSet";
	pub const PAIR: &str = "pair";
	pub const DN: &str = "dn";
	pub const ID: &str = "id";
}

/// Attribute names on requests and response atoms.
pub mod attr {
	pub const COOKIE: &str = "cookie";
	pub const RESPONSE: &str = "response";
	pub const ERROR_CODE: &str = "errorCode";
	pub const ERROR_DESCR: &str = "errorDescr";

	pub const IN_NAME: &str = "inName";
	pub const IN_PASSWORD: &str = "inPassword";
	pub const IN_COOKIE: &str = "inCookie";
	pub const OUT_COOKIE: &str = "outCookie";
	pub const OUT_REFRESH_PERIOD: &str = "outRefreshPeriod";
	pub const OUT_PRIV: &str = "outPriv";
	pub const OUT_VERSION: &str = "outVersion";
	pub const OUT_SESSION_ID: &str = "outSessionId";
	pub const OUT_STATUS: &str = "outStatus";

	pub const CLASS_ID: &str = "classId";
	pub const DN: &str = "dn";
	pub const RN: &str = "rn";
	pub const STATUS: &str = "status";
	pub const KEY: &str = "key";
	pub const VALUE: &str = "value";

	pub const IN_DN: &str = "inDn";
	pub const IN_CLASS: &str = "inClass";
	pub const IN_HIERARCHICAL: &str = "inHierarchical";
	pub const IN_RECURSIVE: &str = "inRecursive";
	pub const IN_SINGLE_LEVEL: &str = "inSingleLevel";
	pub const IN_TARGET_ORG: &str = "inTargetOrg";
	pub const IN_SERVER_NAME: &str = "inServerName";
	pub const IN_SERVER_NAME_PREFIX: &str = "inServerNamePrefixOrEmpty";
	pub const IN_NUMBER_OF: &str = "inNumberOf";
}

/// Values of the `status` attribute used to drive object lifecycle.
pub mod status {
	pub const CREATED: &str = "created";
	pub const MODIFIED: &str = "modified";
	pub const DELETED: &str = "deleted";
}

/// Renders a boolean the way the API expects it in request attributes.
pub fn yes_no(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
