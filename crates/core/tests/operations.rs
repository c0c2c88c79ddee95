//! Operation façade against a scripted manager.

use std::collections::BTreeMap;
use std::sync::Arc;

use ucsm::wire::method;
use ucsm::{Client, Element, Error, ErrorKind, ManagedObject, Placement, Property};
use ucsm_runtime::testing::{ScriptedTransport, fault_reply, login_reply};

async fn logged_in() -> (Client, ScriptedTransport) {
	let transport = ScriptedTransport::new();
	transport.reply(method::AAA_LOGIN, login_reply(method::AAA_LOGIN, "1111/aaaa", 600));
	let client = Client::with_transport(Arc::new(transport.clone()));
	client.login("admin", "secret").await.unwrap();
	(client, transport)
}

fn sent(transport: &ScriptedTransport) -> Element {
	transport.last_request().unwrap()
}

fn child_names(element: &Element) -> Vec<&str> {
	element.children().iter().map(Element::name).collect()
}

fn values(list: &Element) -> Vec<&str> {
	list.children().iter().filter_map(|c| c.attribute("value")).collect()
}

#[tokio::test]
async fn test_resolve_children_with_filter() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_RESOLVE_CHILDREN,
		r#"<configResolveChildren cookie="1111/aaaa" response="yes" classId="lsServer">
			<outConfigs>
				<lsServer dn="org-root/ls-web1" name="web1"/>
				<lsServer dn="org-root/ls-web2" name="web2"/>
			</outConfigs>
		</configResolveChildren>"#,
	);

	let filter = Property::new("lsServer", "name").wildcard_match("web*");
	let found = client.resolve_children(Some("lsServer"), "org-root", Some(&filter), false).await.unwrap();
	assert_eq!(found.len(), 2);
	assert_eq!(found[0].attr("name").unwrap(), "web1");

	let request = sent(&transport);
	assert_eq!(request.attribute("cookie"), Some("1111/aaaa"));
	assert_eq!(request.attribute("classId"), Some("lsServer"));
	assert_eq!(request.attribute("inDn"), Some("org-root"));
	assert_eq!(request.attribute("inHierarchical"), Some("no"));
	assert_eq!(child_names(&request), ["inFilter"]);
	assert_eq!(request.children()[0].children()[0].name(), "wcard");
}

#[tokio::test]
async fn test_resolve_children_without_class_sends_empty_class() {
	let (client, transport) = logged_in().await;
	transport.reply(method::CONFIG_RESOLVE_CHILDREN, r#"<configResolveChildren response="yes"><outConfigs/></configResolveChildren>"#);

	let found = client.resolve_children(None, "sys", None, true).await.unwrap();
	assert!(found.is_empty());
	let request = sent(&transport);
	assert_eq!(request.attribute("classId"), Some(""));
	assert_eq!(request.attribute("inHierarchical"), Some("yes"));
	assert!(request.children().is_empty());
}

#[tokio::test]
async fn test_resolve_class_hierarchical_keeps_subtree() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_RESOLVE_CLASS,
		r#"<configResolveClass response="yes" classId="computeBlade"><outConfigs>
			<computeBlade dn="sys/chassis-1/blade-1"><adaptorUnit id="1"/><biosUnit/></computeBlade>
		</outConfigs></configResolveClass>"#,
	);

	let blades = client.resolve_class("computeBlade", None, true).await.unwrap();
	assert_eq!(blades.len(), 1);
	assert_eq!(blades[0].children().len(), 2);
	assert_eq!(blades[0].find_children("adaptorUnit").len(), 1);
}

#[tokio::test]
async fn test_resolve_classes_sends_id_list() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_RESOLVE_CLASSES,
		r#"<configResolveClasses response="yes"><outConfigs><topSystem dn="sys"/><computeBlade dn="sys/chassis-1/blade-1"/></outConfigs></configResolveClasses>"#,
	);

	let found = client.resolve_classes(&["topSystem", "computeBlade"], false).await.unwrap();
	assert_eq!(found.len(), 2);
	let request = sent(&transport);
	assert_eq!(child_names(&request), ["inIds"]);
	assert_eq!(values(&request.children()[0]), ["topSystem", "computeBlade"]);
}

#[tokio::test]
async fn test_resolve_dn_found_and_missing() {
	let (client, transport) = logged_in().await;
	transport
		.reply(method::CONFIG_RESOLVE_DN, r#"<configResolveDn dn="sys" response="yes"><outConfig><topSystem dn="sys" name="ucs-a"/></outConfig></configResolveDn>"#)
		.reply(method::CONFIG_RESOLVE_DN, r#"<configResolveDn dn="sys/nope" response="yes"><outConfig/></configResolveDn>"#);

	let system = client.resolve_dn("sys", false).await.unwrap().unwrap();
	assert_eq!(system.attr("name").unwrap(), "ucs-a");
	assert_eq!(sent(&transport).attribute("dn"), Some("sys"));

	assert_eq!(client.resolve_dn("sys/nope", false).await.unwrap(), None);
}

#[tokio::test]
async fn test_resolve_dn_without_section_is_fatal() {
	let (client, transport) = logged_in().await;
	transport.reply(method::CONFIG_RESOLVE_DN, r#"<configResolveDn dn="sys" response="yes"/>"#);
	let err = client.resolve_dn("sys", false).await.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Fatal);
}

#[tokio::test]
async fn test_resolve_dns_partitions_input() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_RESOLVE_DNS,
		r#"<configResolveDns response="yes">
			<outConfigs><topSystem dn="sys"/><orgOrg dn="org-root"/></outConfigs>
			<outUnresolved><dn value="sys/bogus"/></outUnresolved>
		</configResolveDns>"#,
	);

	let input = ["sys", "sys/bogus", "org-root"];
	let (resolved, unresolved) = client.resolve_dns(&input, false).await.unwrap();
	assert_eq!(resolved.len() + unresolved.len(), input.len());
	for object in &resolved {
		assert!(!unresolved.iter().any(|dn| Some(dn.as_str()) == object.dn()));
	}
	assert_eq!(unresolved, ["sys/bogus"]);
	assert_eq!(values(&sent(&transport).children()[0]), input);
}

#[tokio::test]
async fn test_resolve_dns_without_unresolved_section_is_fatal() {
	let (client, transport) = logged_in().await;
	transport.reply(method::CONFIG_RESOLVE_DNS, r#"<configResolveDns response="yes"><outConfigs/></configResolveDns>"#);
	assert!(client.resolve_dns(&["sys"], false).await.unwrap_err().is_fatal());
}

#[tokio::test]
async fn test_resolve_parent() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_RESOLVE_PARENT,
		r#"<configResolveParent dn="sys/chassis-1" response="yes"><outConfig><topSystem dn="sys"/></outConfig></configResolveParent>"#,
	);
	let parent = client.resolve_parent("sys/chassis-1", false).await.unwrap().unwrap();
	assert_eq!(parent.dn(), Some("sys"));
}

#[tokio::test]
async fn test_find_dns_by_class_id() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_FIND_DNS_BY_CLASS_ID,
		r#"<configFindDnsByClassId classId="computeBlade" response="yes"><outDns><dn value="sys/chassis-1/blade-1"/><dn value="sys/chassis-1/blade-2"/></outDns></configFindDnsByClassId>"#,
	);
	let filter = Property::new("computeBlade", "operPower").equals("on");
	let dns = client.find_dns_by_class_id("computeBlade", Some(&filter)).await.unwrap();
	assert_eq!(dns, ["sys/chassis-1/blade-1", "sys/chassis-1/blade-2"]);
	assert_eq!(child_names(&sent(&transport)), ["inFilter"]);
}

#[tokio::test]
async fn test_scope_passes_recursive_flag_through() {
	let (client, transport) = logged_in().await;
	transport.reply(method::CONFIG_SCOPE, r#"<configScope dn="sys" response="yes"><outConfigs><computeBlade dn="sys/chassis-1/blade-1"/></outConfigs></configScope>"#);

	let blades = client.scope("computeBlade", "sys", None, false, false).await.unwrap();
	assert_eq!(blades.len(), 1);
	let request = sent(&transport);
	assert_eq!(request.attribute("dn"), Some("sys"));
	assert_eq!(request.attribute("inClass"), Some("computeBlade"));
	assert_eq!(request.attribute("inRecursive"), Some("no"));
}

#[tokio::test]
async fn test_resolve_elements_keys_by_dn() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::ORG_RESOLVE_ELEMENTS,
		r#"<orgResolveElements dn="org-root" response="yes"><outConfigs>
			<pair key="org-root/boot-policy-default"><lsbootPolicy dn="org-root/boot-policy-default" name="default"/></pair>
			<pair key="org-root/boot-policy-pxe"><lsbootPolicy dn="org-root/boot-policy-pxe" name="pxe"/></pair>
		</outConfigs></orgResolveElements>"#,
	);

	let found = client.resolve_elements("org-root", "lsbootPolicy", None, false, false).await.unwrap();
	assert_eq!(found.len(), 2);
	assert!(found.values().all(|o| o.class_id() == "lsbootPolicy"));
	assert_eq!(sent(&transport).attribute("inSingleLevel"), Some("no"));
}

#[tokio::test]
async fn test_conf_mo_sends_node_without_children() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_CONF_MO,
		r#"<configConfMo dn="org-root/ls-web" response="yes"><outConfig><lsServer dn="org-root/ls-web" descr="front" status="modified"/></outConfig></configConfMo>"#,
	);

	let config = ManagedObject::new("lsServer")
		.with_attribute("descr", "front")
		.with_child(ManagedObject::new("vnicEther").with_attribute("name", "eth0"));
	let stored = client.conf_mo(&config, "org-root/ls-web", true).await.unwrap().unwrap();
	assert_eq!(stored.attr("descr").unwrap(), "front");

	let request = sent(&transport);
	assert_eq!(request.attribute("dn"), Some("org-root/ls-web"));
	assert_eq!(request.attribute("inHierarchical"), Some("yes"));
	let in_config = request.child("inConfig").unwrap();
	assert_eq!(in_config.children().len(), 1);
	assert!(in_config.children()[0].children().is_empty());
}

#[tokio::test]
async fn test_conf_mo_fault_is_response_error() {
	let (client, transport) = logged_in().await;
	transport.reply(method::CONFIG_CONF_MO, fault_reply(method::CONFIG_CONF_MO, 103, "can't delete object"));
	let err = client.conf_mo(&ManagedObject::new("orgOrg"), "org-root", false).await.unwrap_err();
	assert_eq!(err, Error::Response { code: 103, text: "can't delete object".into() });
	assert_eq!(err.kind(), ErrorKind::Fault);
}

#[tokio::test]
async fn test_conf_mos_returns_map() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_CONF_MOS,
		r#"<configConfMos response="yes"><outConfigs>
			<pair key="org-root/ls-a"><lsServer dn="org-root/ls-a" descr="a"/></pair>
			<pair key="org-root/ls-b"><lsServer dn="org-root/ls-b" descr="b"/></pair>
		</outConfigs></configConfMos>"#,
	);

	let mut configs = BTreeMap::new();
	configs.insert("org-root/ls-a".to_string(), ManagedObject::new("lsServer").with_attribute("descr", "a"));
	configs.insert("org-root/ls-b".to_string(), ManagedObject::new("lsServer").with_attribute("descr", "b"));
	let stored = client.conf_mos(&configs).await.unwrap();
	assert_eq!(stored.keys().collect::<Vec<_>>(), ["org-root/ls-a", "org-root/ls-b"]);

	let request = sent(&transport);
	let pairs = request.child("inConfigs").unwrap();
	let keys: Vec<_> = pairs.children().iter().filter_map(|p| p.attribute("key")).collect();
	assert_eq!(keys, ["org-root/ls-a", "org-root/ls-b"]);
}

#[tokio::test]
async fn test_conf_mos_with_malformed_pair_is_fatal() {
	let (client, transport) = logged_in().await;
	transport.reply(method::CONFIG_CONF_MOS, r#"<configConfMos response="yes"><outConfigs><pair key="a"/></outConfigs></configConfMos>"#);
	assert!(client.conf_mos(&BTreeMap::new()).await.unwrap_err().is_fatal());
}

#[tokio::test]
async fn test_conf_mo_group_sends_dns_then_config() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_CONF_MO_GROUP,
		r#"<configConfMoGroup response="yes"><outConfigs><lsServer dn="org-root/ls-a"/><lsServer dn="org-root/ls-b"/></outConfigs></configConfMoGroup>"#,
	);

	let dns = vec!["org-root/ls-a".to_string(), "org-root/ls-b".to_string()];
	let config = ManagedObject::new("lsPower").with_attribute("state", "down");
	let changed = client.conf_mo_group(&dns, &config, false).await.unwrap();
	assert_eq!(changed.len(), 2);
	assert_eq!(child_names(&sent(&transport)), ["inDns", "inConfig"]);
}

#[tokio::test]
async fn test_estimate_impact_reads_four_sections() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_ESTIMATE_IMPACT,
		r#"<configEstimateImpact response="yes">
			<outAckables><lsServer dn="org-root/ls-a"/></outAckables>
			<outOldAckables/>
			<outAffected><lsServer dn="org-root/ls-a"/><lsServer dn="org-root/ls-b"/></outAffected>
			<outOldAffected><lsServer dn="org-root/ls-a"/></outOldAffected>
		</configEstimateImpact>"#,
	);

	let mut configs = BTreeMap::new();
	configs.insert("org-root/ls-a".to_string(), ManagedObject::new("lsServer").with_attribute("descr", "x"));
	let report = client.estimate_impact(&configs).await.unwrap();
	assert_eq!(report.ackables.len(), 1);
	assert!(report.old_ackables.is_empty());
	assert_eq!(report.affected.len(), 2);
	assert_eq!(report.old_affected.len(), 1);
	assert!(report.requires_ack());
}

#[tokio::test]
async fn test_estimate_impact_missing_section_is_fatal() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_ESTIMATE_IMPACT,
		r#"<configEstimateImpact response="yes"><outAckables/><outOldAckables/><outAffected/></configEstimateImpact>"#,
	);
	assert!(client.estimate_impact(&BTreeMap::new()).await.unwrap_err().is_fatal());
}

#[tokio::test]
async fn test_create_object_placements() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_CONF_MO,
		r#"<configConfMo response="yes"><outConfig><orgOrg dn="org-root/org-Test1" name="Test1" status="created"/></outConfig></configConfMo>"#,
	);

	let org = ManagedObject::new("orgOrg").with_attribute("name", "Test1").with_attribute("rn", "wrongrn");
	client.create_object(&org, &Placement::under_as("org-root", "org-Test1")).await.unwrap();
	let request = sent(&transport);
	assert_eq!(request.attribute("dn"), Some("org-root/org-Test1"));
	let sent_object = &request.child("inConfig").unwrap().children()[0];
	assert_eq!(sent_object.attribute("dn"), Some("org-root/org-Test1"));
	assert_eq!(sent_object.attribute("status"), Some("created"));
	assert_eq!(sent_object.attribute("rn"), None);

	let org = ManagedObject::new("orgOrg").with_attribute("name", "Test2").with_attribute("rn", "org-Test2");
	client.create_object(&org, &Placement::under("org-root/org-Test1")).await.unwrap();
	assert_eq!(sent(&transport).attribute("dn"), Some("org-root/org-Test1/org-Test2"));

	let org = ManagedObject::new("orgOrg").with_attribute("name", "Test3");
	client.create_object(&org, &Placement::dn("org-root/org-Test3")).await.unwrap();
	assert_eq!(sent(&transport).attribute("dn"), Some("org-root/org-Test3"));

	let org = ManagedObject::new("orgOrg").with_attribute("dn", "org-root/org-Test4");
	client.create_object(&org, &Placement::FromObject).await.unwrap();
	assert_eq!(sent(&transport).attribute("dn"), Some("org-root/org-Test4"));
}

#[tokio::test]
async fn test_create_object_without_dn_is_misuse() {
	let (client, transport) = logged_in().await;
	let before = transport.requests().len();

	let org = ManagedObject::new("orgOrg").with_attribute("name", "Test");
	for placement in [Placement::under("org-root"), Placement::FromObject] {
		let err = client.create_object(&org, &placement).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Misuse);
	}
	assert_eq!(transport.requests().len(), before);
}

#[tokio::test]
async fn test_create_object_requires_echo() {
	let (client, transport) = logged_in().await;
	transport.reply(method::CONFIG_CONF_MO, r#"<configConfMo response="yes"><outConfig/></configConfMo>"#);
	let err = client.create_object(&ManagedObject::new("orgOrg"), &Placement::dn("org-root/org-X")).await.unwrap_err();
	assert!(err.is_fatal());
}

#[tokio::test]
async fn test_update_and_delete_object() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::CONFIG_CONF_MO,
		r#"<configConfMo response="yes"><outConfig><orgOrg dn="org-root/org-Test1" descr="Lorem ipsum"/></outConfig></configConfMo>"#,
	);

	let org = ManagedObject::new("orgOrg")
		.with_attribute("dn", "org-root/org-Test1")
		.with_attribute("descr", "Lorem ipsum");
	let updated = client.update_object(&org).await.unwrap();
	assert_eq!(updated.attr("descr").unwrap(), "Lorem ipsum");
	let sent_object = sent(&transport).child("inConfig").unwrap().children()[0].clone();
	assert_eq!(sent_object.attribute("status"), Some("modified"));

	client.delete_object(&org).await.unwrap();
	let sent_object = sent(&transport).child("inConfig").unwrap().children()[0].clone();
	assert_eq!(sent_object.attribute("status"), Some("deleted"));
	assert_eq!(sent_object.attribute("descr"), None);

	let err = client.update_object(&ManagedObject::new("orgOrg")).await.unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Misuse);
}

#[tokio::test]
async fn test_clone_profile_and_instantiate_template() {
	let (client, transport) = logged_in().await;
	transport
		.reply(method::LS_CLONE, r#"<lsClone response="yes"><outConfig><lsServer dn="org-root/ls-copy" name="copy"/></outConfig></lsClone>"#)
		.reply(
			method::LS_INSTANTIATE_TEMPLATE,
			r#"<lsInstantiateTemplate response="yes"><outConfig><lsServer dn="org-root/org-Test/ls-web" name="web"/></outConfig></lsInstantiateTemplate>"#,
		);

	let clone = client.clone_profile("org-root/ls-11", "copy", None).await.unwrap();
	assert_eq!(clone.attr("name").unwrap(), "copy");
	let request = sent(&transport);
	assert_eq!(request.attribute("dn"), Some("org-root/ls-11"));
	assert_eq!(request.attribute("inServerName"), Some("copy"));
	assert_eq!(request.attribute("inTargetOrg"), Some("org-root"));

	let created = client.instantiate_template("org-root/ls-tmpl", "web", Some("org-root/org-Test")).await.unwrap();
	assert_eq!(ucsm::dn::parent(created.dn().unwrap()), Some("org-root/org-Test"));
	assert_eq!(sent(&transport).attribute("inTargetOrg"), Some("org-root/org-Test"));
}

#[tokio::test]
async fn test_instantiate_n_template() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::LS_INSTANTIATE_N_TEMPLATE,
		r#"<lsInstantiateNTemplate response="yes"><outConfigs><lsServer dn="org-root/ls-web1"/><lsServer dn="org-root/ls-web2"/></outConfigs></lsInstantiateNTemplate>"#,
	);

	let created = client.instantiate_n_template("org-root/ls-tmpl", None, Some("web"), 2).await.unwrap();
	assert_eq!(created.len(), 2);
	let request = sent(&transport);
	assert_eq!(request.attribute("inServerNamePrefixOrEmpty"), Some("web"));
	assert_eq!(request.attribute("inNumberOf"), Some("2"));
}

#[tokio::test]
async fn test_instantiate_n_named_template() {
	let (client, transport) = logged_in().await;
	transport.reply(
		method::LS_INSTANTIATE_N_NAMED_TEMPLATE,
		r#"<lsInstantiateNNamedTemplate response="yes"><outConfigs><lsServer dn="org-root/ls-a" name="a"/><lsServer dn="org-root/ls-b" name="b"/></outConfigs></lsInstantiateNNamedTemplate>"#,
	);

	let created = client.instantiate_n_named_template("org-root/ls-tmpl", &["a", "b"], None).await.unwrap();
	assert_eq!(created.len(), 2);
	let request = sent(&transport);
	assert_eq!(child_names(&request), ["inNameSet"]);
	assert_eq!(values(&request.children()[0]), ["a", "b"]);
}

#[tokio::test]
async fn test_operations_require_login() {
	let transport = ScriptedTransport::new();
	let client = Client::with_transport(Arc::new(transport.clone()));

	let err = client.resolve_class("computeBlade", None, false).await.unwrap_err();
	assert_eq!(err, Error::NotLoggedIn);
	assert_eq!(err.kind(), ErrorKind::Misuse);
	assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_type_mismatch_before_network() {
	let (_client, transport) = logged_in().await;
	let before = transport.requests().len();

	let name = Property::new("lsServer", "name");
	let result = name.equals("web").try_and(5);
	let err: Error = result.unwrap_err().into();
	assert_eq!(err.kind(), ErrorKind::Misuse);
	assert_eq!(transport.requests().len(), before);
}
