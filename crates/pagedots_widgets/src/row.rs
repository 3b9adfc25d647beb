//! Dot row layout
//!
//! Lays the dot sequence out as a single flexbox row: one fixed-size leaf per
//! dot, a leading margin before every dot, a trailing margin after the last
//! one, dots centered vertically. The row never lays out narrower or shorter
//! than its dots.

use pagedots_core::{Rect, Size};
use smallvec::SmallVec;
use taffy::prelude::{
    AlignItems, AvailableSpace, Dimension, Display, FlexDirection, JustifyContent,
    LengthPercentageAuto, NodeId, Rect as Edges, Size as TaffySize, Style, TaffyTree,
};

use crate::error::LayoutError;
use crate::style::IndicatorStyle;

/// Computed geometry of the dot row
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowGeometry {
    /// Bounds of the whole row, origin at (0, 0)
    pub bounds: Rect,
    /// Bounds of each dot, in row coordinates
    pub dots: SmallVec<[Rect; 8]>,
}

impl RowGeometry {
    /// Bounds of the first dot, if any
    pub fn first_dot(&self) -> Option<Rect> {
        self.dots.first().copied()
    }
}

/// Smallest size that fits `count` dots with their margins
pub fn content_size(style: &IndicatorStyle, count: usize) -> Size {
    if count == 0 {
        return Size::ZERO;
    }
    Size::new(
        count as f32 * style.step() + style.margin,
        style.height,
    )
}

/// Lay out `count` dots inside `available`
pub fn layout_row(
    style: &IndicatorStyle,
    count: usize,
    available: Size,
) -> Result<RowGeometry, LayoutError> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let children = (0..count)
        .map(|index| {
            let trailing = if index + 1 == count { style.margin } else { 0.0 };
            tree.new_leaf(dot_style(style, trailing))
        })
        .collect::<Result<Vec<NodeId>, _>>()?;

    let content = content_size(style, count);
    let width = available.width.max(content.width);
    let height = available.height.max(content.height);

    let root = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            justify_content: Some(JustifyContent::Start),
            align_items: Some(AlignItems::Center),
            size: TaffySize {
                width: Dimension::Length(width),
                height: Dimension::Length(height),
            },
            ..Default::default()
        },
        &children,
    )?;

    tree.compute_layout(
        root,
        TaffySize {
            width: AvailableSpace::Definite(width),
            height: AvailableSpace::Definite(height),
        },
    )?;

    let mut dots = SmallVec::with_capacity(count);
    for child in children {
        let layout = tree.layout(child)?;
        dots.push(Rect::new(
            layout.location.x,
            layout.location.y,
            layout.size.width,
            layout.size.height,
        ));
    }

    let root_layout = tree.layout(root)?;
    let geometry = RowGeometry {
        bounds: Rect::new(0.0, 0.0, root_layout.size.width, root_layout.size.height),
        dots,
    };

    tracing::trace!(count, bounds = ?geometry.bounds, "laid out dot row");
    Ok(geometry)
}

fn dot_style(style: &IndicatorStyle, trailing_margin: f32) -> Style {
    Style {
        size: TaffySize {
            width: Dimension::Length(style.width),
            height: Dimension::Length(style.height),
        },
        margin: Edges {
            left: LengthPercentageAuto::Length(style.margin),
            right: LengthPercentageAuto::Length(trailing_margin),
            top: LengthPercentageAuto::Length(0.0),
            bottom: LengthPercentageAuto::Length(0.0),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}
