use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::element::FocusId;
use crate::tui::{Alignment, Element, Layer, LayoutConstraint, Theme};

mod focus_registry;
mod widgets;

pub use focus_registry::{FocusRegistry, FocusableInfo, LayerFocusContext};

/// Per-frame state threaded through the element tree
pub(crate) struct RenderCtx<'a, Msg> {
    pub theme: &'a Theme,
    pub focus: &'a mut FocusRegistry<Msg>,
    pub focused_id: Option<&'a FocusId>,
}

/// Renders elements to the terminal
pub struct Renderer;

impl Renderer {
    /// Draw `element` into `area`, rebuilding the focus registry as a side effect
    pub fn render<Msg: Clone + 'static>(
        frame: &mut Frame,
        theme: &Theme,
        focus_registry: &mut FocusRegistry<Msg>,
        focused_id: Option<&FocusId>,
        element: &Element<Msg>,
        area: Rect,
    ) {
        focus_registry.clear();
        let mut ctx = RenderCtx {
            theme,
            focus: focus_registry,
            focused_id,
        };
        Self::render_element(frame, &mut ctx, element, area, false);
    }

    pub(crate) fn render_element<Msg: Clone + 'static>(
        frame: &mut Frame,
        ctx: &mut RenderCtx<'_, Msg>,
        element: &Element<Msg>,
        area: Rect,
        inside_panel: bool,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        match element {
            Element::None => {}

            Element::Text { content, style } => {
                let style = style.unwrap_or_else(|| Style::default().fg(ctx.theme.text_primary));
                frame.render_widget(Paragraph::new(content.as_str()).style(style), area);
            }

            Element::StyledText { line, background } => {
                let mut widget = Paragraph::new(line.clone());
                if let Some(bg) = background {
                    widget = widget.style(*bg);
                }
                frame.render_widget(widget, area);
            }

            Element::Paragraph { lines, scroll } => {
                let widget = Paragraph::new(lines.clone())
                    .style(Style::default().fg(ctx.theme.text_primary))
                    .wrap(Wrap { trim: false })
                    .scroll((*scroll, 0));
                frame.render_widget(widget, area);
            }

            Element::Linear {
                direction,
                items,
                spacing,
            } => Self::render_linear(frame, ctx, items, *spacing, *direction, area, inside_panel),

            Element::Container { child, padding } => {
                let inner = Rect {
                    x: area.x + padding,
                    y: area.y + padding,
                    width: area.width.saturating_sub(padding * 2),
                    height: area.height.saturating_sub(padding * 2),
                };
                Self::render_element(frame, ctx, child, inner, inside_panel);
            }

            Element::Panel {
                child,
                title,
                border_style,
                ..
            } => {
                let focused_inside = ctx
                    .focused_id
                    .is_some_and(|id| contains_focus(child, id) && !nested_panel_has_focus(child, id));
                let border = if focused_inside {
                    Style::default().fg(ctx.theme.accent_primary)
                } else {
                    border_style.unwrap_or_else(|| Style::default().fg(ctx.theme.border_primary))
                };

                let mut block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .style(Style::default().bg(ctx.theme.bg_base));
                if let Some(title) = title {
                    block = block.title(format!(" {} ", title));
                }
                let inner = block.inner(area);
                frame.render_widget(block, area);
                Self::render_element(frame, ctx, child, inner, true);
            }

            Element::Stack { layers } => Self::render_stack(frame, ctx, layers, area, inside_panel),

            Element::List {
                id,
                items,
                selected,
                scroll_offset,
                on_activate,
                on_navigate,
            } => widgets::render_list(
                frame,
                ctx,
                widgets::ListParts {
                    id,
                    items,
                    selected: *selected,
                    scroll_offset: *scroll_offset,
                    on_activate: *on_activate,
                    on_navigate: *on_navigate,
                },
                area,
                inside_panel,
            ),

            Element::TextInput {
                id,
                value,
                cursor_pos,
                scroll_offset,
                placeholder,
                on_event,
            } => widgets::render_text_input(
                frame,
                ctx,
                widgets::TextInputParts {
                    id,
                    value,
                    cursor_pos: *cursor_pos,
                    scroll_offset: *scroll_offset,
                    placeholder: placeholder.as_deref(),
                    on_event: *on_event,
                },
                area,
            ),

            Element::TextArea {
                id,
                lines,
                cursor,
                scroll_offset,
                invalid,
                on_event,
            } => widgets::render_text_area(
                frame,
                ctx,
                widgets::TextAreaParts {
                    id,
                    lines,
                    cursor: *cursor,
                    scroll_offset: *scroll_offset,
                    invalid: *invalid,
                    on_event: *on_event,
                },
                area,
            ),
        }
    }

    fn render_linear<Msg: Clone + 'static>(
        frame: &mut Frame,
        ctx: &mut RenderCtx<'_, Msg>,
        items: &[(LayoutConstraint, Element<Msg>)],
        spacing: u16,
        direction: Direction,
        area: Rect,
        inside_panel: bool,
    ) {
        if items.is_empty() {
            return;
        }
        let constraints: Vec<Constraint> = items
            .iter()
            .map(|(constraint, _)| match constraint {
                LayoutConstraint::Length(n) => Constraint::Length(*n),
                LayoutConstraint::Min(n) => Constraint::Min(*n),
                LayoutConstraint::Fill(weight) => Constraint::Fill(*weight),
            })
            .collect();
        let chunks = Layout::default()
            .direction(direction)
            .spacing(spacing)
            .constraints(constraints)
            .split(area);

        for ((_, child), chunk) in items.iter().zip(chunks.iter()) {
            Self::render_element(frame, ctx, child, *chunk, inside_panel);
        }
    }

    /// Every layer is drawn, but each one above the base opens a new focus
    /// layer so only the topmost modal's widgets take keys.
    fn render_stack<Msg: Clone + 'static>(
        frame: &mut Frame,
        ctx: &mut RenderCtx<'_, Msg>,
        layers: &[Layer<Msg>],
        area: Rect,
        inside_panel: bool,
    ) {
        for (index, layer) in layers.iter().enumerate() {
            if layer.dim_below {
                frame
                    .buffer_mut()
                    .set_style(area, Style::default().add_modifier(Modifier::DIM).fg(ctx.theme.text_tertiary));
            }
            let layer_area = layer_position(&layer.element, layer.alignment, area);
            if index > 0 {
                ctx.focus.push_layer(index);
                frame.render_widget(Clear, layer_area);
            }
            Self::render_element(frame, ctx, &layer.element, layer_area, inside_panel);
        }

        if let Some(layer) = ctx.focus.active_layer() {
            log::trace!(
                "focus layer {} has {} focusables",
                layer.layer_index,
                layer.focusables.len()
            );
        }
    }
}

/// Where a layer lands inside the stack area
fn layer_position<Msg>(element: &Element<Msg>, alignment: Alignment, container: Rect) -> Rect {
    if alignment == Alignment::Fill {
        return container;
    }
    let (width, height) = estimate_size(element, container);
    match alignment {
        Alignment::TopLeft => Rect { width, height, ..container },
        _ => Rect {
            x: container.x + container.width.saturating_sub(width) / 2,
            y: container.y + container.height.saturating_sub(height) / 2,
            width,
            height,
        },
    }
}

fn estimate_size<Msg>(element: &Element<Msg>, container: Rect) -> (u16, u16) {
    match element {
        Element::Panel {
            child, width, height, ..
        } => {
            let width = width.unwrap_or(container.width.min(80)).min(container.width);
            let height = height
                .unwrap_or_else(|| content_height(child).saturating_add(2).max(8))
                .min(container.height);
            (width, height)
        }
        Element::Text { content, .. } => (content.chars().count() as u16, 1),
        Element::StyledText { line, .. } => (line.width() as u16, 1),
        _ => (container.width, container.height),
    }
}

/// Rows an element asks for when nothing constrains it
fn content_height<Msg>(element: &Element<Msg>) -> u16 {
    match element {
        Element::None => 0,
        Element::Text { .. } | Element::StyledText { .. } | Element::TextInput { .. } => 1,
        Element::Paragraph { lines, .. } => lines.len() as u16,
        Element::List { items, .. } => items.len() as u16,
        Element::TextArea { lines, .. } => lines.len() as u16,
        Element::Linear {
            direction: Direction::Vertical,
            items,
            spacing,
        } => {
            let gaps = (items.len() as u16).saturating_sub(1) * spacing;
            items
                .iter()
                .map(|(constraint, child)| match constraint {
                    LayoutConstraint::Length(n) => *n,
                    LayoutConstraint::Min(n) => (*n).max(content_height(child)),
                    LayoutConstraint::Fill(_) => content_height(child),
                })
                .sum::<u16>()
                + gaps
        }
        Element::Linear { items, .. } => items.iter().map(|(_, child)| content_height(child)).max().unwrap_or(0),
        Element::Container { child, padding } => content_height(child) + padding * 2,
        Element::Panel { child, height, .. } => height.unwrap_or_else(|| content_height(child) + 2),
        Element::Stack { layers } => layers.iter().map(|l| content_height(&l.element)).max().unwrap_or(0),
    }
}

/// True when a focusable with `focused_id` lives somewhere under `element`
pub(crate) fn contains_focus<Msg>(element: &Element<Msg>, focused_id: &FocusId) -> bool {
    match element {
        Element::List { id, .. } | Element::TextInput { id, .. } | Element::TextArea { id, .. } => id == focused_id,
        Element::Linear { items, .. } => {
            items.iter().any(|(_, child)| contains_focus(child, focused_id))
        }
        Element::Container { child, .. } | Element::Panel { child, .. } => contains_focus(child, focused_id),
        Element::Stack { layers } => layers.iter().any(|layer| contains_focus(&layer.element, focused_id)),
        _ => false,
    }
}

/// Focus styling goes to the innermost panel only
fn nested_panel_has_focus<Msg>(element: &Element<Msg>, focused_id: &FocusId) -> bool {
    match element {
        Element::Panel { child, .. } => contains_focus(child, focused_id),
        Element::Linear { items, .. } => {
            items.iter().any(|(_, child)| nested_panel_has_focus(child, focused_id))
        }
        Element::Container { child, .. } => nested_panel_has_focus(child, focused_id),
        Element::Stack { layers } => layers.iter().any(|layer| nested_panel_has_focus(&layer.element, focused_id)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::{ListState, TextInputState};
    use ratatui::{Terminal, backend::TestBackend};

    #[derive(Clone, Debug, PartialEq)]
    enum Msg {
        Pick(usize),
        Edit,
    }

    fn render(element: &Element<Msg>, focused: Option<&FocusId>) -> (FocusRegistry<Msg>, String) {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).expect("terminal");
        let mut registry = FocusRegistry::new();
        let theme = Theme::default();
        terminal
            .draw(|frame| {
                let area = frame.area();
                Renderer::render(frame, &theme, &mut registry, focused, element, area);
            })
            .expect("draw");
        let buffer = terminal.backend().buffer().clone();
        let text = buffer.content().iter().map(|cell| cell.symbol()).collect::<String>();
        (registry, text)
    }

    #[test]
    fn test_panel_and_text_are_drawn() {
        let element = Element::panel(Element::text("Viewer Portal Builder"))
            .title("Studio")
            .build();
        let (_, text) = render(&element, None);
        assert!(text.contains("Studio"));
        assert!(text.contains("Viewer Portal Builder"));
    }

    #[test]
    fn test_widgets_register_focus() {
        let input: Element<Msg> = Element::text_input("label", "Home", &TextInputState::new())
            .on_event(|_| Msg::Edit)
            .build();
        let list = Element::List {
            id: FocusId::new("sections"),
            items: vec![Element::text("Header"), Element::text("Footer")],
            selected: Some(1),
            scroll_offset: 0,
            on_activate: Some(Msg::Pick),
            on_navigate: None,
        };
        let element = crate::col![input, list];
        let (registry, _) = render(&element, None);
        assert_eq!(
            registry.focusable_ids_in_active_layer(),
            vec![FocusId::new("label"), FocusId::new("sections")]
        );
    }

    #[test]
    fn test_modal_layer_owns_focus() {
        let base: Element<Msg> = Element::list("sidebar", &Vec::<Row>::new(), &ListState::new(), &Theme::default()).build();
        let modal: Element<Msg> = Element::panel(
            Element::text_input("title", "", &TextInputState::new())
                .on_event(|_| Msg::Edit)
                .build(),
        )
        .width(30)
        .height(5)
        .build();
        let element = Element::stack(vec![Layer::new(base), Layer::new(modal).align(Alignment::Center).dim(true)]);
        let (registry, _) = render(&element, None);
        assert_eq!(registry.focusable_ids_in_active_layer(), vec![FocusId::new("title")]);
    }

    struct Row;

    impl crate::tui::ListItem for Row {
        type Msg = Msg;

        fn to_element(&self, _theme: &Theme, _is_selected: bool) -> Element<Msg> {
            Element::text("row")
        }
    }
}
