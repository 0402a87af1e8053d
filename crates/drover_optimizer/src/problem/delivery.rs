use serde::Serialize;

use crate::{
    define_index_newtype,
    problem::{kilograms::Kilograms, location::Location},
};

define_index_newtype!(DeliveryIdx, DeliveryPoint);

/// One unit of demand to drop at a customer location. Built once per
/// optimization pass from upstream order data and immutable afterwards.
#[derive(Serialize, Debug, Clone)]
pub struct DeliveryPoint {
    external_id: String,
    order_reference: String,
    weight: Kilograms,
    location: Location,
    address: String,
    client_name: Option<String>,
}

impl DeliveryPoint {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn order_reference(&self) -> &str {
        &self.order_reference
    }

    pub fn weight(&self) -> Kilograms {
        self.weight
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }
}

#[derive(Default)]
pub struct DeliveryPointBuilder {
    external_id: Option<String>,
    order_reference: Option<String>,
    weight: Option<Kilograms>,
    location: Option<Location>,
    address: Option<String>,
    client_name: Option<String>,
}

impl DeliveryPointBuilder {
    pub fn set_delivery_id(&mut self, external_id: String) -> &mut DeliveryPointBuilder {
        self.external_id = Some(external_id);
        self
    }

    pub fn set_order_reference(&mut self, order_reference: String) -> &mut DeliveryPointBuilder {
        self.order_reference = Some(order_reference);
        self
    }

    pub fn set_weight(&mut self, weight: Kilograms) -> &mut DeliveryPointBuilder {
        self.weight = Some(weight);
        self
    }

    pub fn set_location(&mut self, location: Location) -> &mut DeliveryPointBuilder {
        self.location = Some(location);
        self
    }

    pub fn set_address(&mut self, address: String) -> &mut DeliveryPointBuilder {
        self.address = Some(address);
        self
    }

    pub fn set_client_name(&mut self, client_name: String) -> &mut DeliveryPointBuilder {
        self.client_name = Some(client_name);
        self
    }

    pub fn build(self) -> DeliveryPoint {
        DeliveryPoint {
            external_id: self.external_id.expect("Delivery ID is required"),
            order_reference: self.order_reference.unwrap_or_default(),
            weight: self.weight.unwrap_or(Kilograms::ZERO),
            location: self.location.expect("Delivery location is required"),
            address: self.address.unwrap_or_default(),
            client_name: self.client_name,
        }
    }
}
