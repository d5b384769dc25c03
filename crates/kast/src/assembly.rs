//! The declarative closet layout: frame, shelving, doors, sliding
//! sub-closets, hanging bars, and rails, with dowel rows merged in at every
//! panel joint.
//!
//! Builders take the configuration explicitly and return assembly subtrees;
//! nothing here mutates shared geometry — templates are stamped into placed
//! copies.

use crate::{ClosetConfig, ClosetError};
use kast_hardware::{place_dowels_between, DowelPolicy};
use kast_math::{Location, Vec3};
use kast_solid::{Node, Shape};
use log::debug;

/// A dowel row wrapped as an assembly group.
fn dowel_row(
    a: &Shape,
    b: &Shape,
    spacing: f64,
    front_thickness: f64,
    policy: &DowelPolicy,
) -> Result<Node, ClosetError> {
    let dowels = place_dowels_between(a, b, spacing, front_thickness, policy)?;
    Ok(Node::group(dowels.into_iter().map(Node::Leaf).collect()))
}

/// The fixed carcass: four uprights, top, and back, doweled together.
pub fn frame(cfg: &ClosetConfig) -> Result<Node, ClosetError> {
    let policy = cfg.dowel_policy();

    let side = Shape::cuboid(cfg.thickness, cfg.inner_depth(), cfg.side_height())
        .with_label("Side panel");
    let top = Shape::cuboid(cfg.width, cfg.depth(), cfg.thickness).with_label("Top panel");
    let back = Shape::cuboid(cfg.width, cfg.back_thickness, cfg.height - cfg.thickness)
        .with_label("Back panel");

    let mid_y = cfg.inner_depth() / 2.0;
    let mid_z = cfg.side_height() / 2.0;
    let uprights = [
        side.locate(Location::at(cfg.offset(), mid_y, mid_z)),
        side.locate(Location::at(
            cfg.plank_width() + cfg.thickness + cfg.offset(),
            mid_y,
            mid_z,
        )),
        side.locate(Location::at(
            cfg.width - cfg.thickness - cfg.offset() - cfg.plank_width(),
            mid_y,
            mid_z,
        )),
        side.locate(Location::at(cfg.width - cfg.offset(), mid_y, mid_z)),
    ];
    let top = top.locate(Location::at(
        cfg.width / 2.0,
        cfg.depth() / 2.0,
        cfg.side_height() + cfg.offset(),
    ));
    let back = back.locate(Location::at(
        cfg.width / 2.0,
        cfg.depth() - cfg.back_offset(),
        (cfg.height - cfg.thickness) / 2.0,
    ));

    let mut children: Vec<Node> = uprights.iter().cloned().map(Node::Leaf).collect();
    children.push(top.clone().into());
    children.push(back.clone().into());

    for upright in &uprights {
        children.push(dowel_row(upright, &top, 15.0, cfg.thickness, &policy)?);
    }
    for upright in &uprights {
        children.push(dowel_row(upright, &back, 20.0, cfg.back_thickness, &policy)?);
    }
    children.push(dowel_row(&back, &top, 20.0, cfg.back_thickness, &policy)?);

    Ok(Node::named_group("Frame", children))
}

/// One column of fixed shelving: bottom compartment, pants compartment with
/// divider, and three shelves above the dress section.
pub fn shelf_column(cfg: &ClosetConfig, pants_height: f64) -> Node {
    let (bottom_y, pants_y, dress_y) = cfg.plank_heights(pants_height);

    let full_plank = Shape::cuboid(cfg.plank_width(), cfg.inner_depth(), cfg.thickness)
        .with_label("Full plank");
    let bottom_front = Shape::cuboid(cfg.plank_width(), cfg.thickness, cfg.bottom_height)
        .with_label("Bottom front plank");
    let pants_plank_width = cfg.pants_width + cfg.thickness;
    let pants_plank = Shape::cuboid(
        pants_plank_width,
        cfg.inner_depth() - cfg.thickness,
        cfg.thickness,
    )
    .with_label("Pants plank");
    let pants_side = Shape::cuboid(
        cfg.thickness,
        cfg.inner_depth() - cfg.thickness,
        pants_height,
    )
    .with_label("Pants side");

    let x = cfg.plank_horizontal_location();
    let mid_y = cfg.inner_depth() / 2.0;
    let mut children: Vec<Node> = vec![
        full_plank
            .locate(Location::at(x, mid_y, bottom_y))
            .into(),
        bottom_front
            .locate(Location::at(
                x,
                cfg.thickness / 2.0,
                cfg.bottom_height / 2.0,
            ))
            .into(),
        pants_plank
            .locate(Location::at(
                -pants_plank_width / 2.0 + cfg.thickness + cfg.plank_width(),
                mid_y,
                pants_y,
            ))
            .into(),
        pants_side
            .locate(Location::at(
                cfg.plank_width() - pants_plank_width + cfg.offset() + cfg.thickness,
                mid_y,
                bottom_y + pants_height / 2.0 + cfg.offset(),
            ))
            .into(),
    ];

    let top_section_height = cfg.side_height() - dress_y;
    let plank_count = 3;
    let top_plank_space = (top_section_height + cfg.offset()) / plank_count as f64;
    for i in 0..plank_count {
        children.push(
            full_plank
                .locate(Location::at(x, mid_y, top_plank_space * i as f64 + dress_y))
                .into(),
        );
    }

    Node::named_group("Shelves", children)
}

/// Both doors: a wood leaf with a mirror sheet glued to its front.
pub fn doors(cfg: &ClosetConfig) -> Node {
    let door_width = cfg.plank_width() + cfg.thickness * 2.0 - cfg.door_margin * 2.0;
    let wood = Shape::cuboid(door_width, cfg.thickness, cfg.height).with_label("Door");
    let mirror = Shape::cuboid(door_width, cfg.mirror_thickness, cfg.height);

    let door = Node::named_group(
        "Door",
        vec![
            wood.into(),
            mirror
                .locate(Location::at(
                    0.0,
                    -cfg.thickness / 2.0 - cfg.mirror_thickness / 2.0,
                    0.0,
                ))
                .into(),
        ],
    );

    let y = -cfg.thickness / 2.0 - cfg.door_margin;
    let left = door.transformed(&Location::at(
        cfg.plank_horizontal_location(),
        y,
        cfg.height / 2.0,
    ));
    let right = door.transformed(&Location::mirror_x()).transformed(&Location::at(
        cfg.width - cfg.plank_horizontal_location(),
        y,
        cfg.height / 2.0,
    ));

    Node::named_group("Doors", vec![left, right])
}

/// One sliding sub-closet body, built at the origin: back, two sides, top,
/// bottom, nine interior shelves, and dowel rows at every joint.
pub fn sub_closet(cfg: &ClosetConfig) -> Result<Node, ClosetError> {
    let policy = cfg.dowel_policy();
    let t = cfg.thickness;

    let back_panel = Shape::cuboid(cfg.sub_back_thickness, cfg.sub_width(), cfg.sub_height())
        .with_label("Sub closet back");
    let side_panel = Shape::cuboid(cfg.sub_depth - cfg.sub_back_thickness, t, cfg.sub_height())
        .with_label("Sub closet side");
    let bottom_top = Shape::cuboid(cfg.sub_depth, cfg.sub_width(), t)
        .with_label("Sub closet top/bottom");
    let plank = Shape::cuboid(cfg.sub_plank_depth(), cfg.sub_plank_width(), t)
        .with_label("Sub closet plank");

    let body_z = cfg.sub_height() / 2.0 + cfg.sub_lift() + cfg.offset();
    let back = back_panel.locate(Location::at(
        cfg.sub_depth - cfg.sub_back_thickness,
        cfg.sub_width() / 2.0,
        body_z,
    ));
    let left = side_panel.locate(Location::at(
        cfg.sub_depth / 2.0 - cfg.sub_back_thickness,
        cfg.sub_width() - cfg.offset(),
        body_z,
    ));
    let right = side_panel.locate(Location::at(
        cfg.sub_depth / 2.0 - cfg.sub_back_thickness,
        cfg.offset(),
        body_z,
    ));
    let top = bottom_top.locate(Location::at(
        cfg.sub_depth / 2.0 - cfg.sub_back_offset(),
        cfg.sub_width() / 2.0,
        cfg.sub_height() + cfg.sub_lift() + t,
    ));
    let bottom = bottom_top.locate(Location::at(
        cfg.sub_depth / 2.0 - cfg.sub_back_offset(),
        cfg.sub_width() / 2.0,
        cfg.sub_lift(),
    ));

    let mut children: Vec<Node> = vec![
        back.clone().into(),
        left.clone().into(),
        right.clone().into(),
        top.clone().into(),
        bottom.clone().into(),
    ];
    children.push(dowel_row(&left, &top, 8.0, t, &policy)?);
    children.push(dowel_row(&right, &top, 8.0, t, &policy)?);
    children.push(dowel_row(&back, &top, 10.0, t, &policy)?);
    children.push(dowel_row(&left, &bottom, 8.0, t, &policy)?);
    children.push(dowel_row(&right, &bottom, 8.0, t, &policy)?);
    children.push(dowel_row(&back, &bottom, 10.0, t, &policy)?);
    children.push(dowel_row(&left, &back, 20.0, t, &policy)?);
    children.push(dowel_row(&right, &back, 20.0, t, &policy)?);

    let shelf_count = 10;
    for i in 1..shelf_count {
        children.push(
            plank
                .locate(Location::at(
                    cfg.sub_plank_depth() / 2.0 - cfg.sub_back_offset(),
                    cfg.sub_width() / 2.0,
                    i as f64 * cfg.sub_height() / shelf_count as f64 + cfg.sub_lift() + t,
                ))
                .into(),
        );
    }

    Ok(Node::named_group("Sub closet", children))
}

/// The hanging-bar profile: two round bars fused with a web between them.
pub fn hanging_bar(cfg: &ClosetConfig) -> Shape {
    let radius = cfg.bar_width / 2.0;
    let lower = Shape::cylinder(radius, cfg.plank_width()).locate(Location::rotation_y(90.0));
    let upper = lower.transformed(&Location::at(0.0, 0.0, cfg.bar_width));
    let web = Shape::cuboid(
        cfg.plank_width(),
        cfg.bar_width,
        cfg.bar_height - cfg.bar_width,
    )
    .locate(Location::at(0.0, 0.0, cfg.bar_width / 2.0));
    Shape::fused(vec![lower, upper, web])
}

/// Both hanging bars, hung below each column's dress shelf.
pub fn hanging_bars(cfg: &ClosetConfig) -> Node {
    let bar = hanging_bar(cfg);
    let bar_z = |dress_y: f64| {
        dress_y - cfg.offset() - cfg.bar_height / 2.0 - cfg.bar_spacing - cfg.bar_width / 2.0
    };
    let (_, _, dress_left) = cfg.plank_heights(cfg.pants_height_left);
    let (_, _, dress_right) = cfg.plank_heights(cfg.pants_height_right);
    let mid_y = cfg.inner_depth() / 2.0;

    Node::named_group(
        "Hanging bars",
        vec![
            bar.locate(Location::at(
                cfg.plank_horizontal_location(),
                mid_y,
                bar_z(dress_left),
            ))
            .into(),
            bar.locate(Location::at(
                cfg.width - cfg.plank_horizontal_location(),
                mid_y,
                bar_z(dress_right),
            ))
            .into(),
        ],
    )
}

/// The two rails the sub-closets run on.
///
/// The rail is purchased hardware imported from a STEP asset; only its
/// overall extents are carried here, and the cut list ignores it.
pub fn rails(cfg: &ClosetConfig) -> Node {
    let rail = Shape::profile(
        "rail.stp",
        Vec3::new(2.5, cfg.inner_depth(), cfg.rail_height),
    );
    let spread = cfg.sub_depth / 2.0 - cfg.sub_back_offset() + 2.0 / 3.0 * cfg.inner_margin;
    let mid_y = cfg.inner_depth() / 2.0;
    let z = cfg.side_height();

    Node::named_group(
        "Rails",
        vec![
            rail.locate(Location::at(cfg.width / 2.0 - spread, mid_y, z))
                .into(),
            rail.locate(Location::at(cfg.width / 2.0 + spread, mid_y, z))
                .into(),
        ],
    )
}

/// The complete closet: frame, hardware, both shelf columns, both sliding
/// sub-closets, and the doors.
pub fn assemble(cfg: &ClosetConfig) -> Result<Node, ClosetError> {
    cfg.validate()?;

    let frame = frame(cfg)?;
    let hardware = Node::named_group("Hardware", vec![rails(cfg), hanging_bars(cfg)]);

    let shelves_left = shelf_column(cfg, cfg.pants_height_left);
    let shelves_right = shelf_column(cfg, cfg.pants_height_right)
        .transformed(&Location::mirror_x())
        .transformed(&Location::at(cfg.width, 0.0, 0.0));

    let sub = sub_closet(cfg)?;
    let lateral = cfg.sub_depth - cfg.sub_back_offset() + 2.0 / 3.0 * cfg.inner_margin;
    let sub_left = sub.transformed(&Location::at(
        cfg.width / 2.0 - lateral,
        -cfg.door_thickness(),
        0.0,
    ));
    let sub_right = sub
        .transformed(&Location::mirror_x())
        .transformed(&Location::at(
            cfg.width / 2.0 + lateral,
            -cfg.depth() - cfg.offset(),
            0.0,
        ));

    let closet = Node::named_group(
        "Closet",
        vec![
            frame,
            hardware,
            shelves_left,
            shelves_right,
            sub_left,
            sub_right,
            doors(cfg),
        ],
    );
    debug!("assembled closet with {} leaf solids", closet.leaf_count());
    Ok(closet)
}
