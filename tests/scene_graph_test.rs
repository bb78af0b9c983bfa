use cgmath::Vector3;
use stillroom::data_structures::{
    instance::Instance,
    scene_graph::{ContainerNode, Scene, SceneNode},
};

fn group() -> Box<ContainerNode> {
    Box::new(ContainerNode::new())
}

#[test]
fn adoption_only_ever_grows_the_scene() {
    let mut scene = Scene::new();
    assert_eq!(scene.object_count(), 0);

    scene.adopt("floor", group());
    assert_eq!(scene.object_count(), 1);

    scene.adopt("wall", group());
    assert_eq!(scene.object_count(), 2);
}

#[test]
fn a_model_adoption_adds_exactly_two_objects() {
    let mut scene = Scene::new();
    let count = scene.adopt_model("coffee table", group(), group());
    assert_eq!(count, 2);
    assert_eq!(scene.object_count(), 2);
    assert_eq!(scene.objects()[0].label, "coffee table");
    assert_eq!(scene.objects()[1].label, "coffee table outline");
}

#[test]
fn a_composite_adoption_adds_exactly_one_object() {
    let mut scene = Scene::new();

    // The composite root may carry arbitrarily many descendants.
    let mut root = group();
    for _ in 0..5 {
        root.add_child(group());
    }

    let count = scene.adopt_composite("whole room", root);
    assert_eq!(count, 1);
    assert_eq!(scene.object_count(), 1);
}

#[test]
fn load_order_does_not_matter_for_the_population() {
    let mut forward = Scene::new();
    forward.adopt("floor", group());
    forward.adopt_model("table", group(), group());
    forward.adopt_model("rug", group(), group());

    let mut reversed = Scene::new();
    reversed.adopt_model("rug", group(), group());
    reversed.adopt_model("table", group(), group());
    reversed.adopt("floor", group());

    assert_eq!(forward.object_count(), reversed.object_count());
}

#[test]
fn world_transforms_compose_down_the_tree() {
    let mut child = group();
    child.set_local_transform(Instance {
        position: Vector3::new(0.0, 2.0, 0.0),
        ..Instance::new()
    });

    let mut parent = group();
    parent.set_local_transform(Instance {
        position: Vector3::new(1.0, 0.0, 0.0),
        ..Instance::new()
    });
    parent.add_child(child);

    parent.update_world_transforms(&Instance::default());

    // Locals are untouched by propagation; the world transform composes.
    assert_eq!(parent.local_transform().position, Vector3::new(1.0, 0.0, 0.0));
    let child_world = parent.children()[0].world_transform();
    assert_eq!(child_world.position, Vector3::new(1.0, 2.0, 0.0));
}
