use ingestr_common::config::{OutputSettings, QueryCapabilities};
use ingestr_plugins::PluginManager;

pub fn manager(capabilities: QueryCapabilities) -> PluginManager {
    PluginManager::with_defaults(&OutputSettings::new("/tmp/ingestr-tests", 7), capabilities)
        .unwrap()
}

/// dnsenum report with one `host` entry per `(address, hostname)` pair.
pub fn dnsenum_report(hosts: &[(&str, Option<&str>)]) -> Vec<u8> {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <magictree class=\"MtBranchObject\">\n\
         <testdata class=\"MtBranchObject\">\n",
    );
    for (address, hostname) in hosts {
        xml.push_str("<host>");
        xml.push_str(address);
        if let Some(hostname) = hostname {
            xml.push_str(&format!("<hostname>{hostname}</hostname>"));
        }
        xml.push_str("\n</host>\n");
    }
    xml.push_str("</testdata>\n</magictree>\n");
    xml.into_bytes()
}
