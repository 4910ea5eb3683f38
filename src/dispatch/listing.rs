//! `sai --list-providers`.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use super::provider::{Provider, ServiceManager, default_os_provider};
use super::verb::{ProviderCategory, Verb};
use crate::common::distro::HostProfile;
use crate::providers;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderRow {
    pub name: &'static str,
    pub category: ProviderCategory,
    pub verbs: Vec<Verb>,
    /// Default OS provider or service manager on this host.
    pub host_default: bool,
}

/// Every provider and service manager, in table order, with the verbs each
/// handles. Service verbs only appear on the service manager rows since
/// routing never hands them to a named provider.
pub fn provider_rows(host: &HostProfile) -> Vec<ProviderRow> {
    let default_provider = default_os_provider(host);
    let host_manager = ServiceManager::for_host(host);

    let named = [
        ProviderCategory::Os,
        ProviderCategory::Container,
        ProviderCategory::Cloud,
    ]
    .into_iter()
    .flat_map(Provider::in_category)
    .map(|provider| ProviderRow {
        name: provider.name(),
        category: provider.category(),
        verbs: Verb::ALL
            .into_iter()
            .filter(|verb| !verb.is_service_verb() && providers::supports_verb(provider, *verb))
            .collect(),
        host_default: provider == default_provider,
    });
    let managers = ServiceManager::ALL.into_iter().map(|manager| ProviderRow {
        name: manager.name(),
        category: ProviderCategory::Service,
        verbs: ProviderCategory::Service.valid_verbs().to_vec(),
        host_default: Some(manager) == host_manager,
    });

    named.chain(managers).collect()
}

pub fn render_table(rows: &[ProviderRow]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Provider", "Category", "Verbs", "Default"]);

    for row in rows {
        let verbs: Vec<&str> = row.verbs.iter().map(Verb::as_str).collect();
        table.add_row(vec![
            row.name.to_string(),
            row.category.to_string(),
            verbs.join(", "),
            if row.host_default { "yes" } else { "" }.to_string(),
        ]);
    }
    table.to_string()
}
