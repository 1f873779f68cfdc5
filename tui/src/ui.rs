//! Rendering for the single product manager screen.
//!
//! Layout runs top to bottom: header, the three form fields, the submit
//! label, the product list, and a key hint line. The failure alert
//! paints over everything as a centered modal.

use amma_core::{format_price, Alert, Product};
use ratatui::{
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Focus};

pub fn render(frame: &mut Frame, app: &mut App) {
    let [header, name_input, description_input, price_input, submit, list_area, hint] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    frame.render_widget(
        Paragraph::new("Productos AMMA")
            .style(Style::default().bold())
            .centered(),
        header,
    );

    let draft = app.screen.draft();
    render_input(frame, name_input, " Nombre ", &draft.name, app.focus == Focus::Name);
    render_input(
        frame,
        description_input,
        " Descripción ",
        &draft.description,
        app.focus == Focus::Description,
    );
    render_input(frame, price_input, " Precio ", &draft.price, app.focus == Focus::Price);

    frame.render_widget(
        Paragraph::new(app.screen.submit_label())
            .style(Style::default().fg(Color::Blue).bold())
            .centered(),
        submit,
    );

    let items: Vec<ListItem> = app.screen.products().iter().map(product_row).collect();
    let list = List::new(items)
        .block(Block::default().title(" Productos ").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, list_area, &mut app.list_state);

    let hint_text = match app.focus {
        Focus::List => "↑↓ Navegar | Enter/e Editar | d Eliminar | Tab Formulario | q Salir",
        _ => "Tab Campo | Enter Guardar | Esc Lista",
    };
    frame.render_widget(
        Paragraph::new(hint_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        hint,
    );

    if let Some(alert) = app.screen.alert() {
        render_alert(frame, alert);
    } else {
        let draft = app.screen.draft();
        let target = match app.focus {
            Focus::Name => Some((name_input, draft.name.chars().count())),
            Focus::Description => Some((description_input, draft.description.chars().count())),
            Focus::Price => Some((price_input, draft.price.chars().count())),
            Focus::List => None,
        };
        if let Some((area, chars)) = target {
            // +1 for border
            let column = app.cursor.min(chars) as u16;
            frame.set_cursor_position(Position::new(area.x + 1 + column, area.y + 1));
        }
    }
}

fn render_input(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(value).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        ),
        area,
    );
}

fn product_row(product: &Product) -> ListItem<'static> {
    let text = Text::from(vec![
        Line::styled(product.name.clone(), Style::default().bold()),
        Line::raw(product.description.clone()),
        Line::styled(
            format!("Precio: ${}", format_price(product.price)),
            Style::default().fg(Color::Green),
        ),
        Line::from(vec![
            Span::styled("Editar", Style::default().fg(Color::Blue)),
            Span::raw("  "),
            Span::styled("Eliminar", Style::default().fg(Color::Red)),
        ]),
        Line::raw(""),
    ]);
    ListItem::new(text)
}

fn render_alert(frame: &mut Frame, alert: Alert) {
    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", alert.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [_, message, _, hint] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(alert.message()).centered(), message);
    frame.render_widget(
        Paragraph::new("Enter para cerrar")
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        hint,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [v_area] = vertical.areas(area);
    let [h_area] = horizontal.areas(v_area);
    h_area
}
