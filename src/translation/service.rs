//! Service profile, VLAN translation profile and bandwidth profile translation.

use super::paths::{service_port_path, vlans_path, SERVICE_VOLTHA_PREFIX, VLANS_VOLTHA_PREFIX};
use super::{vlan_id_to_yang, PathValueItem, YANG_VLAN_ID_ANY};
use crate::alias::ServiceAlias;
use crate::ports::{BandwidthProfile, UniTagInfo};

/// Translates a programmed service into the leaves of its service profile port.
///
/// Bandwidth profile references are not emitted until their translation is
/// settled; see [`translate_bandwidth_profiles`].
#[must_use]
pub fn translate_service(tag_info: &UniTagInfo, alias: &ServiceAlias) -> Vec<PathValueItem> {
    let port = service_port_path(&alias.service_name, &alias.key.port);
    let leaf = |name: &str| format!("{port}/{SERVICE_VOLTHA_PREFIX}:{name}");

    let mut items = Vec::with_capacity(7);

    if let Some(mac) = tag_info.configured_mac_address.as_deref().filter(|m| !m.is_empty()) {
        items.push(PathValueItem::new(leaf("configured-mac-address"), mac));
    }

    items.extend([
        PathValueItem::new(format!("{port}/port-vlans/port-vlan[name='{}']", alias.vlans_name), ""),
        PathValueItem::new(
            leaf("technology-profile-id"),
            tag_info.technology_profile_id.to_string(),
        ),
        PathValueItem::new(leaf("mac-learning-enabled"), tag_info.enable_mac_learning.to_string()),
        PathValueItem::new(leaf("dhcp-required"), tag_info.is_dhcp_required.to_string()),
        PathValueItem::new(leaf("igmp-required"), tag_info.is_igmp_required.to_string()),
        PathValueItem::new(leaf("pppoe-required"), tag_info.is_pppoe_required.to_string()),
    ]);

    items
}

/// Translates the VLAN handling of a programmed service into its VLAN
/// translation profile.
///
/// Match criteria are only emitted for a UNI tag match above zero. Priority
/// bits are emitted one by one when present and non-negative.
#[must_use]
pub fn translate_vlans(tag_info: &UniTagInfo, alias: &ServiceAlias) -> Vec<PathValueItem> {
    let vlans = vlans_path(&alias.vlans_name);
    let mut items = Vec::with_capacity(8);

    if let Some(uni_tag_match) = tag_info.uni_tag_match.filter(|m| *m > 0) {
        items.push(PathValueItem::new(
            format!("{vlans}/match-criteria/outer-tag/vlan-id"),
            vlan_id_to_yang(uni_tag_match),
        ));
        items.push(PathValueItem::new(
            format!("{vlans}/match-criteria/second-tag/vlan-id"),
            YANG_VLAN_ID_ANY,
        ));
    }

    let priorities = [
        (tag_info.us_pon_s_tag_priority, "push-outer-tag/pbit".to_string()),
        (tag_info.ds_pon_s_tag_priority, format!("push-outer-tag/{VLANS_VOLTHA_PREFIX}:dpbit")),
        (tag_info.us_pon_c_tag_priority, "push-second-tag/pbit".to_string()),
        (tag_info.ds_pon_c_tag_priority, format!("push-second-tag/{VLANS_VOLTHA_PREFIX}:dpbit")),
    ];
    for (priority, leaf) in priorities {
        if let Some(p) = priority.filter(|p| *p >= 0) {
            items.push(PathValueItem::new(
                format!("{vlans}/ingress-rewrite/{leaf}"),
                p.to_string(),
            ));
        }
    }

    items.push(PathValueItem::new(
        format!("{vlans}/ingress-rewrite/push-outer-tag/vlan-id"),
        vlan_id_to_yang(tag_info.pon_s_tag),
    ));
    items.push(PathValueItem::new(
        format!("{vlans}/ingress-rewrite/push-second-tag/vlan-id"),
        vlan_id_to_yang(tag_info.pon_c_tag),
    ));

    items
}

/// Translates bandwidth profiles. The target representation is not agreed
/// yet, so nothing is emitted.
#[must_use]
pub fn translate_bandwidth_profiles(_profiles: &[BandwidthProfile]) -> Vec<PathValueItem> {
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::ServiceKey;
    use crate::translation::paths::{SERVICE_PROFILES_PATH, VLANS_PATH};
    use crate::translation::value_at;

    fn tag_info() -> UniTagInfo {
        UniTagInfo {
            uni_tag_match: Some(100),
            pon_c_tag: 4096,
            pon_s_tag: 102,
            technology_profile_id: 64,
            upstream_bandwidth_profile: Some("BW1".into()),
            downstream_bandwidth_profile: Some("BW2".into()),
            upstream_olt_bandwidth_profile: Some("OLTBW".into()),
            is_dhcp_required: true,
            is_igmp_required: false,
            is_pppoe_required: false,
            configured_mac_address: Some("00:11:22:33:44:55".into()),
            enable_mac_learning: true,
            us_pon_c_tag_priority: Some(1),
            us_pon_s_tag_priority: Some(2),
            ds_pon_c_tag_priority: Some(3),
            ds_pon_s_tag_priority: Some(-1),
            service_name: "testService".into(),
            ..UniTagInfo::default()
        }
    }

    fn alias() -> ServiceAlias {
        ServiceAlias {
            key: ServiceKey::new("TESTPORT-1", "101", "102", "64"),
            service_name: "TESTPORT-1-testService".into(),
            vlans_name: "TESTPORT-1-testService-vlans".into(),
        }
    }

    #[test]
    fn service_translation() {
        let items = translate_service(&tag_info(), &alias());
        let port = format!(
            "{SERVICE_PROFILES_PATH}/service-profile[name='TESTPORT-1-testService']/ports/port[name='TESTPORT-1']"
        );
        let v = |leaf: &str| format!("{port}/bbf-nt-service-profile-voltha:{leaf}");

        assert_eq!(value_at(&items, &v("configured-mac-address")), Some("00:11:22:33:44:55"));
        assert_eq!(value_at(&items, &v("technology-profile-id")), Some("64"));
        assert_eq!(value_at(&items, &v("mac-learning-enabled")), Some("true"));
        assert_eq!(value_at(&items, &v("dhcp-required")), Some("true"));
        assert_eq!(value_at(&items, &v("igmp-required")), Some("false"));
        assert_eq!(value_at(&items, &v("pppoe-required")), Some("false"));
        let vlans = format!("{port}/port-vlans/port-vlan[name='TESTPORT-1-testService-vlans']");
        assert_eq!(value_at(&items, &vlans), Some(""));
        assert!(value_at(&items, &v("downstream-olt-bp-name")).is_none());
    }

    #[test]
    fn empty_mac_is_omitted() {
        let mut info = tag_info();
        info.configured_mac_address = Some(String::new());
        let items = translate_service(&info, &alias());
        assert!(!items.iter().any(|i| i.path.ends_with("configured-mac-address")));
        assert_eq!(items.len(), 6);
    }

    #[test]
    fn vlan_creation_marker_precedes_leaves_below_it() {
        let items = translate_service(&tag_info(), &alias());
        let marker = items.iter().position(|i| i.path.contains("port-vlan[name=")).unwrap();
        assert!(items[marker].value.is_empty());
        assert!(!items[..marker].iter().any(|i| i.path.contains("/port-vlans/")));
    }

    #[test]
    fn vlans_translation() {
        let items = translate_vlans(&tag_info(), &alias());
        let p =
            format!("{VLANS_PATH}/vlan-translation-profile[name='TESTPORT-1-testService-vlans']");

        let expected = [
            ("match-criteria/outer-tag/vlan-id", "100"),
            ("match-criteria/second-tag/vlan-id", "any"),
            ("ingress-rewrite/push-outer-tag/vlan-id", "102"),
            ("ingress-rewrite/push-second-tag/vlan-id", "any"),
            ("ingress-rewrite/push-second-tag/pbit", "1"),
            ("ingress-rewrite/push-outer-tag/pbit", "2"),
            ("ingress-rewrite/push-second-tag/bbf-voltha-vlan-translation:dpbit", "3"),
        ];
        for (leaf, value) in expected {
            assert_eq!(
                value_at(&items, &format!("{p}/{leaf}")),
                Some(value),
                "wrong value for {leaf}"
            );
        }
        assert!(value_at(
            &items,
            &format!("{p}/ingress-rewrite/push-outer-tag/bbf-voltha-vlan-translation:dpbit")
        )
        .is_none());
        assert!(!items.iter().any(|i| i.value == "4096"));
    }

    #[test]
    fn zero_or_absent_uni_tag_match_emits_no_match_criteria() {
        for uni_tag_match in [Some(0), None] {
            let mut info = tag_info();
            info.uni_tag_match = uni_tag_match;
            let items = translate_vlans(&info, &alias());
            assert!(!items.iter().any(|i| i.path.contains("match-criteria")));
        }
    }

    #[test]
    fn absent_priorities_are_omitted() {
        let mut info = tag_info();
        info.us_pon_s_tag_priority = None;
        info.us_pon_c_tag_priority = None;
        info.ds_pon_c_tag_priority = None;
        let items = translate_vlans(&info, &alias());
        assert!(!items.iter().any(|i| i.path.contains("pbit")));
        assert!(items.iter().any(|i| i.path.ends_with("push-outer-tag/vlan-id")));
        assert!(items.iter().any(|i| i.path.ends_with("push-second-tag/vlan-id")));
    }

    #[test]
    fn vlans_translation_is_deterministic() {
        assert_eq!(translate_vlans(&tag_info(), &alias()), translate_vlans(&tag_info(), &alias()));
    }

    #[test]
    fn bandwidth_profiles_translate_to_nothing() {
        let profiles =
            vec![BandwidthProfile { id: "BW1".into(), cir: Some(1000), ..Default::default() }];
        assert!(translate_bandwidth_profiles(&profiles).is_empty());
    }
}
