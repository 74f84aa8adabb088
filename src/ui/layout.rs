use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::state::{FacetKind, SessionState};

const EDITOR_HEIGHT: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub header: Rect,
    pub body: Rect,
    pub detail: Option<Rect>,
    pub editor: Option<Rect>,
    pub prompt: Option<Rect>,
    pub status: Rect,
}

pub fn split_layout(area: Rect, state: &SessionState) -> UiLayout {
    let header_height = (state.header_info().len() as u16).clamp(1, 4);
    let text_facet = state.active_text_facet();
    let prompt_height = match text_facet {
        Some(FacetKind::Command | FacetKind::Sql) => 1,
        _ => 0,
    };
    let editor_height = match text_facet {
        Some(FacetKind::FullSql) => EDITOR_HEIGHT,
        _ => 0,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(1),
            Constraint::Length(editor_height),
            Constraint::Length(prompt_height),
            Constraint::Length(1),
        ])
        .split(area);

    let (body, detail) = if state.has_detail() {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);
        (halves[0], Some(halves[1]))
    } else {
        (chunks[1], None)
    };

    UiLayout {
        header: chunks[0],
        body,
        detail,
        editor: (editor_height > 0).then_some(chunks[2]),
        prompt: (prompt_height > 0).then_some(chunks[3]),
        status: chunks[4],
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::split_layout;
    use crate::state::{HeaderInfo, StateBuilder};

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 120,
        height: 40,
    };

    #[test]
    fn plain_browse_reserves_header_and_status_only() {
        let layout = split_layout(AREA, &StateBuilder::new().build());
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.body.height, 38);
        assert!(layout.prompt.is_none());
        assert!(layout.editor.is_none());
        assert!(layout.detail.is_none());
    }

    #[test]
    fn overlays_claim_their_rows() {
        let info = HeaderInfo::from([
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]);
        let command = StateBuilder::new().common(info).empty_command().build();
        let layout = split_layout(AREA, &command);
        assert_eq!(layout.header.height, 2);
        assert_eq!(layout.prompt.map(|r| r.height), Some(1));

        let editor = StateBuilder::new().empty_full_sql().build();
        assert_eq!(split_layout(AREA, &editor).editor.map(|r| r.height), Some(8));

        let detail = StateBuilder::new().detail("CREATE TABLE t").build();
        let layout = split_layout(AREA, &detail);
        assert!(layout.detail.is_some());
        assert!(layout.body.width < AREA.width);
    }
}
