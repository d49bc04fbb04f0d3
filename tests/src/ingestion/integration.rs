use ingestr_common::config::QueryCapabilities;
use ingestr_common::record::DiscoveryRecord;
use ingestr_core::ingest::{Document, IngestionService};
use ingestr_core::registry::InMemoryRegistry;

use crate::utils::{dnsenum_report, manager};

#[test]
fn dnsenum_report_yields_records_in_order() {
    let manager = manager(QueryCapabilities::detect());
    let plugin = manager.get("dnsenum").unwrap();
    let report = dnsenum_report(&[("10.0.0.1", Some("a.example.com")), ("10.0.0.2", None)]);

    let records: Vec<DiscoveryRecord> = plugin.parser().parse(&report).unwrap().collect();

    assert_eq!(
        records,
        vec![
            DiscoveryRecord::new("10.0.0.1", Some("a.example.com")).unwrap(),
            DiscoveryRecord::new("10.0.0.2", None).unwrap(),
        ]
    );
}

#[test]
fn every_entry_becomes_a_record() {
    let hosts: Vec<(String, Option<String>)> = (1..=50)
        .map(|n| (format!("10.1.0.{n}"), (n % 3 == 0).then(|| format!("h{n}.example.com"))))
        .collect();
    let borrowed: Vec<(&str, Option<&str>)> = hosts
        .iter()
        .map(|(a, h)| (a.as_str(), h.as_deref()))
        .collect();

    for capabilities in [QueryCapabilities::detect(), QueryCapabilities::fallback()] {
        let manager = manager(capabilities);
        let parser = manager.get("dnsenum").unwrap().parser();
        let addresses: Vec<String> = parser
            .parse(&dnsenum_report(&borrowed))
            .unwrap()
            .map(|r| r.address().to_string())
            .collect();
        let expected: Vec<String> = hosts.iter().map(|(a, _)| a.clone()).collect();
        assert_eq!(addresses, expected);
    }
}

#[test]
fn malformed_reports_never_panic() {
    let manager = manager(QueryCapabilities::detect());
    let parser = manager.get("dnsenum").unwrap().parser();

    let inputs: [&[u8]; 6] = [
        b"",
        b"dnsenum VERSION:1.2.2",
        b"<magictree><testdata><host>10.0.0.1</hostname></testdata></magictree>",
        b"<magictree><testdata>",
        b"<magictree></magictree><magictree/>",
        &[0xfe, 0xff, 0x00, 0x3c],
    ];
    for input in inputs {
        assert!(parser.parse(input).is_err());
        assert_eq!(parser.parse_or_empty(input).count(), 0);
    }
}

#[test]
fn importing_twice_returns_the_same_ids() {
    let manager = manager(QueryCapabilities::detect());
    let parser = manager.get("dnsenum").unwrap().parser();
    let report = dnsenum_report(&[
        ("10.0.0.1", Some("a.example.com")),
        ("10.0.0.2", None),
        ("2001:db8::5", Some("v6.example.com")),
    ]);

    let mut service = IngestionService::new(InMemoryRegistry::new());
    let first = service.ingest(parser, &report).unwrap();
    let second = service.ingest(parser, &report).unwrap();

    assert_eq!(first, second);
    let registry = service.into_registry();
    assert_eq!(registry.host_count(), 3);
    assert_eq!(registry.interface_count(), 3);

    let v6_host = first.records[2].host;
    let v6_iface = registry.interfaces_of(v6_host).next().unwrap();
    assert!(v6_iface.ipv6.is_some());
    assert_eq!(v6_iface.hostnames, vec!["v6.example.com"]);
}

#[test]
fn batch_survives_a_corrupt_report() {
    let manager = manager(QueryCapabilities::detect());
    let parser = manager.get("dnsenum").unwrap().parser();
    let documents = vec![
        Document::new("a.xml", dnsenum_report(&[("10.0.0.1", None)])),
        Document::new("corrupt.xml", b"<magictree><testdata><host>10.0.0.9".to_vec()),
        Document::new("b.xml", dnsenum_report(&[("10.0.0.1", Some("one.example.com")), ("10.0.0.2", None)])),
    ];

    let mut service = IngestionService::new(InMemoryRegistry::new());
    let batch = service.ingest_batch(parser, &documents).unwrap();

    assert_eq!(batch.skipped.len(), 1);
    assert_eq!(batch.skipped[0].source, "corrupt.xml");
    assert_eq!(batch.record_count(), 3);

    let registry = service.registry();
    assert_eq!(registry.host_count(), 2);
    let first_host = registry.hosts()[0].id;
    let iface = registry.interfaces_of(first_host).next().unwrap();
    assert_eq!(iface.hostnames, vec!["one.example.com"]);
}

#[test]
fn rewrite_then_import_uses_plugin_output_path() {
    let manager = manager(QueryCapabilities::detect());
    let plugin = manager.select_for_command("dnsenum -o custom.xml example.com").unwrap();

    let rewritten = plugin.rewrite_command("dnsenum -o custom.xml example.com");
    assert_eq!(
        rewritten,
        format!("dnsenum -o {} example.com", plugin.output_path().display())
    );
    assert_eq!(rewritten.matches("-o ").count(), 1);
}
