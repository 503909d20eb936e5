use crate::bom_merge::domain::{Bom, Component, Metadata, Service};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// BomNormalizer domain service
///
/// Final clean-up applied to every merged document, in order:
/// 1. create metadata if absent
/// 2. turn empty collections into absent ones
/// 3. reset `version` to 1
/// 4. assign a fresh `urn:uuid:` serial number
/// 5. stamp `metadata.timestamp` if absent
///
/// Normalizing twice changes nothing but the serial number.
pub struct BomNormalizer;

impl BomNormalizer {
    pub fn normalize(bom: Bom) -> Bom {
        Self::normalize_at(bom, Utc::now())
    }

    /// Same as [`normalize`](Self::normalize) with a fixed clock
    pub fn normalize_at(mut bom: Bom, now: DateTime<Utc>) -> Bom {
        if bom.metadata().is_none() {
            *bom.metadata_mut() = Some(Metadata::new());
        }
        Self::strip_empty_collections(&mut bom);
        bom.set_version(1);
        bom.set_serial_number(Some(Self::generate_serial_number()));
        if let Some(metadata) = bom.metadata_mut() {
            if metadata.timestamp().is_none() {
                metadata.set_timestamp(Some(now));
            }
        }
        bom
    }

    pub fn generate_serial_number() -> String {
        format!("urn:uuid:{}", Uuid::new_v4())
    }

    fn strip_empty_collections(bom: &mut Bom) {
        if let Some(metadata) = bom.metadata_mut() {
            if metadata.tools().is_empty() {
                *metadata.tools_mut() = None;
            }
            if let Some(subject) = metadata.component_mut() {
                Self::strip_component(subject);
            }
        }

        if let Some(components) = bom.components_mut() {
            components.iter_mut().for_each(Self::strip_component);
        }
        if bom.components().is_empty() {
            *bom.components_mut() = None;
        }

        if let Some(services) = bom.services_mut() {
            services.iter_mut().for_each(Self::strip_service);
        }
        if bom.services().is_empty() {
            *bom.services_mut() = None;
        }

        if let Some(dependencies) = bom.dependencies_mut() {
            for dependency in dependencies.iter_mut() {
                if dependency.depends_on().is_empty() {
                    *dependency.depends_on_mut() = None;
                }
            }
        }
        if bom.dependencies().is_empty() {
            *bom.dependencies_mut() = None;
        }
    }

    fn strip_component(component: &mut Component) {
        if let Some(children) = component.components_mut() {
            children.iter_mut().for_each(Self::strip_component);
        }
        if component.components().is_empty() {
            *component.components_mut() = None;
        }
    }

    fn strip_service(service: &mut Service) {
        if let Some(children) = service.services_mut() {
            children.iter_mut().for_each(Self::strip_service);
        }
        if service.services().is_empty() {
            *service.services_mut() = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom_merge::domain::{ComponentType, Dependency};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn messy() -> Bom {
        Bom::default()
            .with_version(7)
            .with_serial_number("urn:uuid:00000000-0000-0000-0000-000000000000")
            .with_components(vec![Component::new(ComponentType::Library, "a")
                .with_bom_ref("a")
                .with_components(vec![])])
            .with_services(vec![Service::new("api").with_services(vec![])])
            .with_dependencies(vec![Dependency::new("a", vec![])])
    }

    #[test]
    fn test_normalize_fills_metadata_and_resets_counters() {
        let bom = BomNormalizer::normalize_at(messy(), fixed_time());

        assert_eq!(bom.version(), 1);
        assert_eq!(bom.metadata().unwrap().timestamp(), Some(fixed_time()));
        let serial = bom.serial_number().unwrap();
        assert!(serial.starts_with("urn:uuid:"));
        assert_ne!(serial, "urn:uuid:00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_normalize_strips_empty_collections() {
        let bom = BomNormalizer::normalize_at(messy(), fixed_time());

        assert!(bom.components()[0].components_option().is_none());
        assert!(bom.dependencies()[0].depends_on_option().is_none());
        assert!(bom.metadata().unwrap().tools_option().is_none());
        assert!(bom.services()[0].services_option().is_none());

        let empty = BomNormalizer::normalize_at(
            Bom::default()
                .with_components(vec![])
                .with_services(vec![])
                .with_dependencies(vec![]),
            fixed_time(),
        );
        assert!(empty.components_option().is_none());
        assert!(empty.services_option().is_none());
        assert!(empty.dependencies_option().is_none());
    }

    #[test]
    fn test_normalize_keeps_existing_timestamp() {
        let original = fixed_time();
        let bom = Bom::default().with_metadata(Metadata::new().with_timestamp(original));

        let later = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let bom = BomNormalizer::normalize_at(bom, later);

        assert_eq!(bom.metadata().unwrap().timestamp(), Some(original));
    }

    #[test]
    fn test_normalize_is_idempotent_except_serial() {
        let once = BomNormalizer::normalize_at(messy(), fixed_time());
        let twice = BomNormalizer::normalize_at(once.clone(), Utc::now());

        assert_ne!(once.serial_number(), twice.serial_number());

        let mut once = once;
        let mut twice = twice;
        once.set_serial_number(None);
        twice.set_serial_number(None);
        assert_eq!(once, twice);
    }
}
