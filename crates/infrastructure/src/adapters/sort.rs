//! Sort serialization in the Spring Data convention

use url::form_urlencoded::byte_serialize;

use courier_application::ports::SortSerializer;
use courier_domain::SortSpec;

/// Renders sort entries as repeated `sort=property,direction` parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpringSortSerializer;

impl SpringSortSerializer {
    /// Creates the serializer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SortSerializer for SpringSortSerializer {
    fn serialize(&self, sort: &SortSpec) -> String {
        sort.orders()
            .iter()
            .map(|order| {
                let property: String = byte_serialize(order.property.as_bytes()).collect();
                format!("sort={property},{}", order.direction)
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
