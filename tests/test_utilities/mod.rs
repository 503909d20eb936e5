//! Shared helpers for integration tests
#![allow(dead_code)]

pub mod mocks;

use cdx_merge::prelude::*;

/// Library component with version and a bom-ref equal to its name
pub fn library(name: &str, version: &str) -> Component {
    Component::new(ComponentType::Library, name)
        .with_version(version)
        .with_bom_ref(format!("pkg:generic/{}@{}", name, version))
}

/// Document with an application subject depending on every listed component
pub fn application_bom(app: &str, components: Vec<Component>) -> Bom {
    let app_ref = format!("{}@1.0.0", app);
    let depends_on = components
        .iter()
        .filter_map(|c| c.bom_ref().map(String::from))
        .collect();
    let mut dependencies = vec![Dependency::new(app_ref.clone(), depends_on)];
    dependencies.extend(
        components
            .iter()
            .filter_map(|c| c.bom_ref().map(Dependency::leaf)),
    );

    Bom::new(SpecVersion::V1_5)
        .with_metadata(
            Metadata::new().with_component(
                Component::new(ComponentType::Application, app)
                    .with_version("1.0.0")
                    .with_bom_ref(app_ref),
            ),
        )
        .with_components(components)
        .with_dependencies(dependencies)
}
