use std::sync::Arc;

use ipld_core::ipld::Ipld;

use crate::context::Context;
use crate::error::Error;
use crate::field::FIELD_ITEM_LIST_INTERFACE;
use crate::format::FormatSet;
use crate::normalizer::{Handler, Normalizer, NormalizerBase};
use crate::object::{Data, Object};
use crate::serializer::Serializer;
use crate::types::TypeRegistry;

/// Normalizes a field to the list of its normalized items.
#[derive(Debug, Clone)]
pub struct FieldItemListNormalizer {
    base: NormalizerBase,
}

impl FieldItemListNormalizer {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        FieldItemListNormalizer {
            base: NormalizerBase::new(registry, &FIELD_ITEM_LIST_INTERFACE),
        }
    }

    pub fn with_formats(mut self, formats: impl Into<FormatSet>) -> Self {
        self.base = self.base.with_formats(formats);
        self
    }
}

impl Handler for FieldItemListNormalizer {
    fn base(&self) -> &NormalizerBase {
        &self.base
    }
}

impl Normalizer for FieldItemListNormalizer {
    fn normalize(
        &self,
        object: &dyn Object,
        format: Option<&str>,
        context: &mut Context<'_>,
        serializer: &Serializer,
    ) -> Result<Ipld, Error> {
        let list = object.as_field_item_list().ok_or_else(|| Error::MissingCapability {
            type_name: object.type_info().name().to_string(),
            capability: "field item list",
        })?;
        self.base.add_cacheable_dependency(context, Data::Object(object));

        list.items()
            .into_iter()
            .map(|item| serializer.normalize(Data::Object(item), format, context))
            .collect::<Result<Vec<_>, _>>()
            .map(Ipld::List)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, CountingSink, HOLLOW_LIST, Hollow, TestItem, TestList};
    use crate::normalizers::FieldItemNormalizer;

    #[test]
    fn normalizes_items_through_serializer() {
        let registry = Arc::new(fixtures::registry());
        let serializer = Serializer::builder()
            .normalizer(Arc::new(FieldItemListNormalizer::new(registry.clone())))
            .handler(FieldItemNormalizer::new(registry))
            .build();
        let list = TestList::new(
            "field_tags",
            vec![
                TestItem::new("field_tags")
                    .with_values([("target_id", Ipld::Integer(1))])
                    .with_tags(&["taxonomy_term:1"]),
                TestItem::new("field_tags")
                    .with_values([("target_id", Ipld::Integer(2))])
                    .with_tags(&["taxonomy_term:2"]),
            ],
        )
        .with_tags(&["config:field.storage.node.field_tags"]);
        let mut sink = CountingSink::default();

        let normalized = {
            let mut context = Context::new().with_cacheability(&mut sink);
            serializer
                .normalize(Data::Object(&list), Some("json"), &mut context)
                .unwrap()
        };

        let Ipld::List(items) = normalized else {
            panic!("Expected List");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(sink.count, 3);
        assert_eq!(
            sink.tags,
            vec![
                "config:field.storage.node.field_tags".to_string(),
                "taxonomy_term:1".to_string(),
                "taxonomy_term:2".to_string(),
            ]
        );
    }

    #[test]
    fn missing_item_normalizer_fails_the_whole_list() {
        let registry = Arc::new(fixtures::registry());
        let serializer = Serializer::builder()
            .normalizer(Arc::new(FieldItemListNormalizer::new(registry)))
            .build();
        let list = TestList::new("field_tags", vec![TestItem::new("field_tags")]);

        let err = serializer
            .normalize(Data::Object(&list), None, &mut Context::new())
            .unwrap_err();
        assert!(matches!(err, Error::NoNormalizer { ref type_name, .. } if type_name == "MapItem"));
    }

    #[test]
    fn list_type_without_view_is_an_error() {
        let normalizer = FieldItemListNormalizer::new(Arc::new(fixtures::registry()));
        let serializer = Serializer::builder().build();
        let hollow = Hollow(&HOLLOW_LIST);
        let mut sink = CountingSink::default();

        let err = {
            let mut context = Context::new().with_cacheability(&mut sink);
            normalizer
                .normalize(&hollow, None, &mut context, &serializer)
                .unwrap_err()
        };
        assert!(matches!(
            err,
            Error::MissingCapability { type_name, capability: "field item list" }
                if type_name == "HollowList"
        ));
        assert_eq!(sink.count, 0);
    }
}
