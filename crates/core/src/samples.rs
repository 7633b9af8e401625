//! Built-in sample models shown before the user submits anything.

use crate::classifier::Shape;
use crate::descriptor::ModelDescriptor;

/// The sample catalog, in display order.
pub fn sample_models() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::fixed_primitive("car_red", "Red Sports Car", Shape::Box, "#E53935", 1.2),
        ModelDescriptor::fixed_primitive("cat_orange", "Orange Cat", Shape::Sphere, "#FB8C00", 1.0),
        ModelDescriptor::fixed_primitive("chair_brown", "Modern Chair", Shape::Box, "#795548", 0.9),
        ModelDescriptor::fixed_primitive("tree_green", "Pine Tree", Shape::Cylinder, "#2E7D32", 1.5),
        ModelDescriptor::fixed_primitive(
            "spaceship_silver",
            "Futuristic Spaceship",
            Shape::Cylinder,
            "#B0BEC5",
            1.3,
        ),
    ]
}

/// Look up a sample by id.
pub fn find_sample(id: &str) -> Option<ModelDescriptor> {
    sample_models().into_iter().find(|m| m.id() == id)
}
