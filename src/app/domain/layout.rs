//! Split-pane editor layout.
//!
//! The workspace is a tree whose leaves are tab containers and whose inner
//! nodes are splitters laying out two or more children along one axis:
//!
//! ```text
//! Splitter(Horizontal)
//! ├── Container[A]
//! └── Splitter(Vertical)
//!     ├── Container[B]
//!     └── Container[C]
//! ```
//!
//! The tree always holds at least one container and no splitter ever keeps
//! fewer than two children. Tab content is opaque (`C`); the editor uses a
//! document id. Screen geometry lives in the widget layer, which reports it
//! back as [`PaneRegion`]s when a tab is dropped.

use super::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SplitId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Children side by side, left to right.
    Horizontal,
    /// Children stacked, top to bottom.
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tab<C> {
    pub id: TabId,
    pub title: String,
    pub content: C,
}

#[derive(Debug)]
pub struct Container<C> {
    id: PaneId,
    tabs: Vec<Tab<C>>,
    active: Option<usize>,
}

impl<C> Container<C> {
    fn new(id: PaneId) -> Self {
        Self {
            id,
            tabs: Vec::new(),
            active: None,
        }
    }

    pub fn id(&self) -> PaneId {
        self.id
    }

    pub fn tabs(&self) -> &[Tab<C>] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&Tab<C>> {
        self.tabs.get(self.active?)
    }

    pub fn position(&self, tab: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab)
    }

    fn push(&mut self, tab: Tab<C>) {
        self.tabs.push(tab);
        self.active = Some(self.tabs.len() - 1);
    }

    /// Remove the tab at `index`. Activates the nearest neighbor if the
    /// removed tab was active.
    fn remove(&mut self, index: usize) -> Option<Tab<C>> {
        if index >= self.tabs.len() {
            return None;
        }
        let tab = self.tabs.remove(index);
        self.active = match self.active {
            _ if self.tabs.is_empty() => None,
            Some(a) if a > index => Some(a - 1),
            Some(a) if a == index => Some(index.min(self.tabs.len() - 1)),
            other => other,
        };
        Some(tab)
    }

    fn set_active(&mut self, index: usize) -> bool {
        if index < self.tabs.len() {
            self.active = Some(index);
            true
        } else {
            false
        }
    }
}

#[derive(Debug)]
pub struct Splitter<C> {
    id: SplitId,
    orientation: Orientation,
    children: Vec<LayoutNode<C>>,
}

impl<C> Splitter<C> {
    pub fn id(&self) -> SplitId {
        self.id
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn children(&self) -> &[LayoutNode<C>] {
        &self.children
    }
}

#[derive(Debug)]
pub enum LayoutNode<C> {
    Container(Container<C>),
    Splitter(Splitter<C>),
}

impl<C> LayoutNode<C> {
    fn container_id(&self) -> Option<PaneId> {
        match self {
            LayoutNode::Container(c) => Some(c.id),
            LayoutNode::Splitter(_) => None,
        }
    }

    fn collect_containers<'a>(&'a self, out: &mut Vec<&'a Container<C>>) {
        match self {
            LayoutNode::Container(c) => out.push(c),
            LayoutNode::Splitter(s) => {
                for child in &s.children {
                    child.collect_containers(out);
                }
            }
        }
    }

    fn find_container(&self, id: PaneId) -> Option<&Container<C>> {
        match self {
            LayoutNode::Container(c) => (c.id == id).then_some(c),
            LayoutNode::Splitter(s) => s.children.iter().find_map(|child| child.find_container(id)),
        }
    }

    fn find_container_mut(&mut self, id: PaneId) -> Option<&mut Container<C>> {
        match self {
            LayoutNode::Container(c) => (c.id == id).then_some(c),
            LayoutNode::Splitter(s) => s
                .children
                .iter_mut()
                .find_map(|child| child.find_container_mut(id)),
        }
    }
}

/// Screen bounds of one container, reported by the widget layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneRegion {
    pub pane: PaneId,
    pub tab_strip: Rect,
    pub content: Rect,
    pub visible: bool,
}

impl PaneRegion {
    /// Drop area: tab strip plus content area.
    pub fn hit_area(&self) -> Rect {
        self.tab_strip.united(&self.content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Moved { tab: TabId, from: PaneId, to: PaneId },
    /// Dropped back onto the container it came from.
    SameContainer,
    /// Dropped outside every visible container.
    NoTarget,
    /// The dragged index does not name a tab of the source container.
    InvalidTab,
}

pub struct PaneLayout<C> {
    root: LayoutNode<C>,
    main: PaneId,
    next_id: u64,
}

impl<C> Default for PaneLayout<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> PaneLayout<C> {
    pub fn new() -> Self {
        let main = PaneId(1);
        Self {
            root: LayoutNode::Container(Container::new(main)),
            main,
            next_id: 2,
        }
    }

    fn next_raw_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn root(&self) -> &LayoutNode<C> {
        &self.root
    }

    /// The container new tabs are opened in.
    pub fn main_pane(&self) -> PaneId {
        self.main
    }

    /// All containers in tree order (left/top first).
    pub fn containers(&self) -> Vec<&Container<C>> {
        let mut out = Vec::new();
        self.root.collect_containers(&mut out);
        out
    }

    pub fn container_count(&self) -> usize {
        self.containers().len()
    }

    pub fn container(&self, id: PaneId) -> Option<&Container<C>> {
        self.root.find_container(id)
    }

    fn container_mut(&mut self, id: PaneId) -> Option<&mut Container<C>> {
        self.root.find_container_mut(id)
    }

    /// Append a tab to the main container and make it active there.
    pub fn add_tab(&mut self, content: C, title: impl Into<String>) -> TabId {
        let id = TabId(self.next_raw_id());
        let main = self.main;
        let tab = Tab {
            id,
            title: title.into(),
            content,
        };
        match self.container_mut(main) {
            Some(container) => container.push(tab),
            // main always names a live container; recover by re-pointing it
            None => {
                let first = self.containers()[0].id;
                self.main = first;
                if let Some(container) = self.container_mut(first) {
                    container.push(tab);
                }
            }
        }
        id
    }

    pub fn find_tab(&self, tab: TabId) -> Option<(PaneId, usize)> {
        self.containers()
            .into_iter()
            .find_map(|c| c.position(tab).map(|index| (c.id, index)))
    }

    pub fn tab(&self, tab: TabId) -> Option<&Tab<C>> {
        let (pane, index) = self.find_tab(tab)?;
        self.container(pane)?.tabs.get(index)
    }

    pub fn tab_mut(&mut self, tab: TabId) -> Option<&mut Tab<C>> {
        let (pane, index) = self.find_tab(tab)?;
        self.container_mut(pane)?.tabs.get_mut(index)
    }

    pub fn set_active(&mut self, pane: PaneId, index: usize) -> bool {
        self.container_mut(pane).is_some_and(|c| c.set_active(index))
    }

    /// Activate a tab wherever it lives. Returns its container.
    pub fn activate_tab(&mut self, tab: TabId) -> Option<PaneId> {
        let (pane, index) = self.find_tab(tab)?;
        self.set_active(pane, index);
        Some(pane)
    }

    /// Insert a new empty container next to `target`.
    ///
    /// When the parent splitter already runs along `orientation` the new
    /// container joins it directly after `target`; otherwise a new splitter
    /// takes `target`'s place holding `target` and the new container.
    pub fn split(&mut self, target: PaneId, orientation: Orientation) -> Option<PaneId> {
        self.container(target)?;
        let new_id = PaneId(self.next_raw_id());
        let split_id = SplitId(self.next_raw_id());
        let mut fresh = Some(Container::new(new_id));

        if let LayoutNode::Splitter(root) = &mut self.root {
            if !split_within(root, target, orientation, &mut fresh, split_id) {
                return None;
            }
        } else {
            let old_root = std::mem::replace(
                &mut self.root,
                LayoutNode::Splitter(Splitter {
                    id: split_id,
                    orientation,
                    children: Vec::with_capacity(2),
                }),
            );
            if let (LayoutNode::Splitter(root), Some(new_container)) = (&mut self.root, fresh.take()) {
                root.children.push(old_root);
                root.children.push(LayoutNode::Container(new_container));
            }
        }
        log::debug!("split pane {:?} {:?} -> new pane {:?}", target, orientation, new_id);
        Some(new_id)
    }

    /// Remove a container, returning the tabs it still held.
    ///
    /// Refused (`None`) for the last remaining container or an unknown id.
    /// Splitters left with a single child are replaced by that child.
    pub fn close_with_tabs(&mut self, target: PaneId) -> Option<Vec<Tab<C>>> {
        if self.container_count() <= 1 {
            return None;
        }
        let LayoutNode::Splitter(root) = &mut self.root else {
            return None;
        };
        let removed = remove_within(root, target)?;
        self.collapse_root();

        if self.main == target {
            self.main = self.containers()[0].id;
        }
        log::debug!("closed pane {:?}", target);
        Some(removed.tabs)
    }

    /// Remove a container, dropping its tabs. `false` when refused.
    pub fn close(&mut self, target: PaneId) -> bool {
        self.close_with_tabs(target).is_some()
    }

    fn collapse_root(&mut self) {
        if let LayoutNode::Splitter(root) = &mut self.root
            && root.children.len() == 1
            && let Some(only) = root.children.pop()
        {
            self.root = only;
        }
    }

    /// Close one tab. A container emptied this way is closed too, unless it
    /// is the last one.
    pub fn close_tab(&mut self, pane: PaneId, index: usize) -> Option<Tab<C>> {
        let container = self.container_mut(pane)?;
        let tab = container.remove(index)?;
        if container.is_empty() {
            self.close(pane);
        }
        Some(tab)
    }

    /// Move the tab at `index` of `source` to the end of `target`, making it
    /// active there.
    pub fn move_tab(&mut self, source: PaneId, index: usize, target: PaneId) -> Option<TabId> {
        if source == target || self.container(target).is_none() {
            return None;
        }
        let tab = self.container_mut(source)?.remove(index)?;
        let id = tab.id;
        self.container_mut(target)?.push(tab);
        Some(id)
    }

    /// Resolve the container under a screen position.
    ///
    /// Hidden, zero-area and stale regions are never candidates; later
    /// regions are treated as lying on top of earlier ones.
    pub fn resolve_drop_target(&self, x: i32, y: i32, regions: &[PaneRegion]) -> Option<PaneId> {
        regions
            .iter()
            .rev()
            .filter(|r| r.visible && !r.hit_area().is_empty())
            .filter(|r| self.container(r.pane).is_some())
            .find(|r| r.hit_area().contains(x, y))
            .map(|r| r.pane)
    }

    /// Finish a tab drag released at screen position `(x, y)`.
    pub fn drag_tab(
        &mut self,
        source: PaneId,
        tab_index: usize,
        x: i32,
        y: i32,
        regions: &[PaneRegion],
    ) -> DragOutcome {
        let valid = self
            .container(source)
            .is_some_and(|c| tab_index < c.len());
        if !valid {
            return DragOutcome::InvalidTab;
        }
        let Some(target) = self.resolve_drop_target(x, y, regions) else {
            return DragOutcome::NoTarget;
        };
        if target == source {
            return DragOutcome::SameContainer;
        }
        match self.move_tab(source, tab_index, target) {
            Some(tab) => DragOutcome::Moved {
                tab,
                from: source,
                to: target,
            },
            None => DragOutcome::InvalidTab,
        }
    }
}

fn split_within<C>(
    splitter: &mut Splitter<C>,
    target: PaneId,
    orientation: Orientation,
    fresh: &mut Option<Container<C>>,
    split_id: SplitId,
) -> bool {
    if let Some(index) = splitter
        .children
        .iter()
        .position(|c| c.container_id() == Some(target))
    {
        let Some(new_container) = fresh.take() else {
            return false;
        };
        if splitter.orientation == orientation {
            splitter
                .children
                .insert(index + 1, LayoutNode::Container(new_container));
        } else {
            let existing = splitter.children.remove(index);
            splitter.children.insert(
                index,
                LayoutNode::Splitter(Splitter {
                    id: split_id,
                    orientation,
                    children: vec![existing, LayoutNode::Container(new_container)],
                }),
            );
        }
        return true;
    }

    splitter.children.iter_mut().any(|child| match child {
        LayoutNode::Splitter(inner) => split_within(inner, target, orientation, fresh, split_id),
        LayoutNode::Container(_) => false,
    })
}

fn remove_within<C>(splitter: &mut Splitter<C>, target: PaneId) -> Option<Container<C>> {
    if let Some(index) = splitter
        .children
        .iter()
        .position(|c| c.container_id() == Some(target))
    {
        return match splitter.children.remove(index) {
            LayoutNode::Container(container) => Some(container),
            LayoutNode::Splitter(_) => None,
        };
    }

    for child in splitter.children.iter_mut() {
        let LayoutNode::Splitter(inner) = child else {
            continue;
        };
        if let Some(removed) = remove_within(inner, target) {
            if inner.children.len() == 1
                && let Some(only) = inner.children.pop()
            {
                *child = only;
            }
            return Some(removed);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter_sizes<C>(node: &LayoutNode<C>, out: &mut Vec<usize>) {
        if let LayoutNode::Splitter(s) = node {
            out.push(s.children().len());
            for child in s.children() {
                splitter_sizes(child, out);
            }
        }
    }

    fn assert_well_formed<C>(layout: &PaneLayout<C>) {
        assert!(layout.container_count() >= 1);
        let mut sizes = Vec::new();
        splitter_sizes(layout.root(), &mut sizes);
        assert!(sizes.iter().all(|&n| n >= 2), "degenerate splitter: {sizes:?}");
        assert!(layout.container(layout.main_pane()).is_some());
    }

    fn region(pane: PaneId, x: i32, y: i32, w: i32, h: i32) -> PaneRegion {
        PaneRegion {
            pane,
            tab_strip: Rect::new(x, y, w, 30),
            content: Rect::new(x, y + 30, w, h - 30),
            visible: true,
        }
    }

    #[test]
    fn test_new_layout_has_one_container() {
        let layout: PaneLayout<u32> = PaneLayout::new();
        assert_eq!(layout.container_count(), 1);
        assert!(matches!(layout.root(), LayoutNode::Container(_)));
    }

    #[test]
    fn test_add_tab_goes_to_main_and_activates() {
        let mut layout = PaneLayout::new();
        let a = layout.add_tab(1, "a.txt");
        let b = layout.add_tab(2, "b.txt");
        let main = layout.container(layout.main_pane()).unwrap();
        assert_eq!(main.len(), 2);
        assert_eq!(main.active_tab().map(|t| t.id), Some(b));
        assert_eq!(layout.find_tab(a), Some((layout.main_pane(), 0)));
    }

    #[test]
    fn test_split_root_creates_splitter() {
        let mut layout: PaneLayout<u32> = PaneLayout::new();
        let main = layout.main_pane();
        let new = layout.split(main, Orientation::Horizontal).unwrap();

        let LayoutNode::Splitter(root) = layout.root() else {
            panic!("root should be a splitter");
        };
        assert_eq!(root.orientation(), Orientation::Horizontal);
        let ids: Vec<_> = layout.containers().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![main, new]);
    }

    #[test]
    fn test_split_same_orientation_does_not_nest() {
        let mut layout: PaneLayout<u32> = PaneLayout::new();
        let main = layout.main_pane();
        let second = layout.split(main, Orientation::Horizontal).unwrap();
        let third = layout.split(main, Orientation::Horizontal).unwrap();

        let LayoutNode::Splitter(root) = layout.root() else {
            panic!("root should be a splitter");
        };
        assert_eq!(root.children().len(), 3);
        let ids: Vec<_> = layout.containers().iter().map(|c| c.id()).collect();
        // Inserted directly after the split container
        assert_eq!(ids, vec![main, third, second]);
    }

    #[test]
    fn test_split_other_orientation_nests_in_place() {
        let mut layout: PaneLayout<u32> = PaneLayout::new();
        let main = layout.main_pane();
        let right = layout.split(main, Orientation::Horizontal).unwrap();
        let below = layout.split(right, Orientation::Vertical).unwrap();

        let LayoutNode::Splitter(root) = layout.root() else {
            panic!("root should be a splitter");
        };
        assert_eq!(root.children().len(), 2);
        let LayoutNode::Splitter(inner) = &root.children()[1] else {
            panic!("second child should be a nested splitter");
        };
        assert_eq!(inner.orientation(), Orientation::Vertical);
        let ids: Vec<_> = layout.containers().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![main, right, below]);
        assert_well_formed(&layout);
    }

    #[test]
    fn test_split_unknown_container() {
        let mut layout: PaneLayout<u32> = PaneLayout::new();
        assert_eq!(layout.split(PaneId(999), Orientation::Vertical), None);
        assert_eq!(layout.container_count(), 1);
    }

    #[test]
    fn test_close_last_container_is_noop() {
        let mut layout = PaneLayout::new();
        layout.add_tab(7, "seven");
        let main = layout.main_pane();
        assert!(!layout.close(main));
        assert_eq!(layout.container_count(), 1);
        assert_eq!(layout.container(main).unwrap().len(), 1);
    }

    #[test]
    fn test_close_collapses_single_child_splitter() {
        let mut layout: PaneLayout<u32> = PaneLayout::new();
        let main = layout.main_pane();
        let right = layout.split(main, Orientation::Horizontal).unwrap();
        let below = layout.split(right, Orientation::Vertical).unwrap();

        assert!(layout.close(below));
        // Nested vertical splitter collapsed back into the horizontal root
        let LayoutNode::Splitter(root) = layout.root() else {
            panic!("root should be a splitter");
        };
        assert!(root.children().iter().all(|c| matches!(c, LayoutNode::Container(_))));
        assert_well_formed(&layout);

        assert!(layout.close(right));
        assert!(matches!(layout.root(), LayoutNode::Container(_)));
        assert_eq!(layout.container_count(), 1);
    }

    #[test]
    fn test_close_main_repoints_main() {
        let mut layout: PaneLayout<u32> = PaneLayout::new();
        let main = layout.main_pane();
        let other = layout.split(main, Orientation::Vertical).unwrap();
        assert!(layout.close(main));
        assert_eq!(layout.main_pane(), other);
        let tab = layout.add_tab(3, "three");
        assert_eq!(layout.find_tab(tab), Some((other, 0)));
    }

    #[test]
    fn test_close_returns_remaining_tabs() {
        let mut layout = PaneLayout::new();
        let main = layout.main_pane();
        let other = layout.split(main, Orientation::Horizontal).unwrap();
        layout.add_tab(10, "ten");
        let tabs = layout.close_with_tabs(main).unwrap();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].content, 10);
        assert_eq!(layout.containers().len(), 1);
        assert_eq!(layout.containers()[0].id(), other);
    }

    #[test]
    fn test_random_split_close_sequences_stay_well_formed() {
        // Small LCG keeps the sequence deterministic
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as usize
        };

        for _ in 0..20 {
            let mut layout: PaneLayout<u32> = PaneLayout::new();
            for _ in 0..60 {
                let ids: Vec<_> = layout.containers().iter().map(|c| c.id()).collect();
                let target = ids[next() % ids.len()];
                if next() % 3 == 0 {
                    let before = layout.container_count();
                    let closed = layout.close(target);
                    if before == 1 {
                        assert!(!closed);
                    } else {
                        assert!(closed);
                        assert_eq!(layout.container_count(), before - 1);
                    }
                } else {
                    let orientation = if next() % 2 == 0 {
                        Orientation::Horizontal
                    } else {
                        Orientation::Vertical
                    };
                    let before = layout.container_count();
                    assert!(layout.split(target, orientation).is_some());
                    assert_eq!(layout.container_count(), before + 1);
                }
                assert_well_formed(&layout);
            }
        }
    }

    #[test]
    fn test_drag_tab_moves_between_containers() {
        let mut layout = PaneLayout::new();
        let a = layout.main_pane();
        let b = layout.split(a, Orientation::Horizontal).unwrap();
        let t1 = layout.add_tab("one", "one.rs");
        let t2 = layout.add_tab("two", "two.rs");

        let regions = [region(a, 0, 0, 300, 400), region(b, 300, 0, 300, 400)];
        let outcome = layout.drag_tab(a, 0, 450, 200, &regions);
        assert_eq!(outcome, DragOutcome::Moved { tab: t1, from: a, to: b });

        let source = layout.container(a).unwrap();
        assert!(source.position(t1).is_none());
        assert_eq!(source.len(), 1);
        assert_eq!(source.active_tab().map(|t| t.id), Some(t2));

        let target = layout.container(b).unwrap();
        assert_eq!(target.tabs().iter().filter(|t| t.id == t1).count(), 1);
        assert_eq!(target.active_tab().map(|t| t.title.as_str()), Some("one.rs"));
        assert_eq!(target.active_tab().map(|t| t.content), Some("one"));
    }

    #[test]
    fn test_drag_tab_onto_tab_strip_counts() {
        let mut layout = PaneLayout::new();
        let a = layout.main_pane();
        let b = layout.split(a, Orientation::Vertical).unwrap();
        layout.add_tab(1, "one");
        let regions = [region(a, 0, 0, 300, 200), region(b, 0, 200, 300, 200)];
        // y = 210 is inside b's tab strip
        assert!(matches!(
            layout.drag_tab(a, 0, 10, 210, &regions),
            DragOutcome::Moved { to, .. } if to == b
        ));
    }

    #[test]
    fn test_drag_tab_outside_everything_is_noop() {
        let mut layout = PaneLayout::new();
        let a = layout.main_pane();
        let b = layout.split(a, Orientation::Horizontal).unwrap();
        let t1 = layout.add_tab(1, "one");
        let regions = [region(a, 0, 0, 300, 400), region(b, 300, 0, 300, 400)];

        assert_eq!(layout.drag_tab(a, 0, 900, 900, &regions), DragOutcome::NoTarget);
        assert_eq!(layout.find_tab(t1), Some((a, 0)));
        assert!(layout.container(b).unwrap().is_empty());
    }

    #[test]
    fn test_drag_tab_onto_own_container_is_noop() {
        let mut layout = PaneLayout::new();
        let a = layout.main_pane();
        layout.split(a, Orientation::Horizontal).unwrap();
        let t1 = layout.add_tab(1, "one");
        let regions = [region(a, 0, 0, 300, 400)];
        assert_eq!(layout.drag_tab(a, 0, 20, 20, &regions), DragOutcome::SameContainer);
        assert_eq!(layout.find_tab(t1), Some((a, 0)));
    }

    #[test]
    fn test_drag_ignores_hidden_empty_and_stale_regions() {
        let mut layout = PaneLayout::new();
        let a = layout.main_pane();
        let b = layout.split(a, Orientation::Horizontal).unwrap();
        let t1 = layout.add_tab(1, "one");

        let mut hidden = region(b, 300, 0, 300, 400);
        hidden.visible = false;
        let zero = PaneRegion {
            pane: b,
            tab_strip: Rect::new(300, 0, 0, 0),
            content: Rect::new(300, 0, 0, 0),
            visible: true,
        };
        let stale = region(PaneId(4242), 300, 0, 300, 400);
        let regions = [region(a, 0, 0, 300, 400), hidden, zero, stale];

        assert_eq!(layout.drag_tab(a, 0, 400, 100, &regions), DragOutcome::NoTarget);
        assert_eq!(layout.find_tab(t1), Some((a, 0)));
    }

    #[test]
    fn test_drag_prefers_topmost_region() {
        let mut layout = PaneLayout::new();
        let a = layout.main_pane();
        let b = layout.split(a, Orientation::Horizontal).unwrap();
        let c = layout.split(b, Orientation::Vertical).unwrap();
        layout.add_tab(1, "one");
        // b and c overlap; c was reported last
        let regions = [
            region(a, 0, 0, 300, 400),
            region(b, 300, 0, 300, 400),
            region(c, 300, 100, 300, 300),
        ];
        assert_eq!(layout.resolve_drop_target(400, 200, &regions), Some(c));
        assert_eq!(layout.resolve_drop_target(400, 50, &regions), Some(b));
    }

    #[test]
    fn test_drag_invalid_index() {
        let mut layout: PaneLayout<u32> = PaneLayout::new();
        let a = layout.main_pane();
        assert_eq!(layout.drag_tab(a, 3, 0, 0, &[]), DragOutcome::InvalidTab);
    }

    #[test]
    fn test_close_tab_closes_emptied_container() {
        let mut layout = PaneLayout::new();
        let a = layout.main_pane();
        let b = layout.split(a, Orientation::Horizontal).unwrap();
        layout.add_tab(1, "one");
        layout.move_tab(a, 0, b).unwrap();
        layout.add_tab(2, "two");

        let closed = layout.close_tab(b, 0).unwrap();
        assert_eq!(closed.content, 1);
        assert!(layout.container(b).is_none());
        assert_eq!(layout.container_count(), 1);

        // The last container survives losing its last tab
        layout.close_tab(a, 0).unwrap();
        assert_eq!(layout.container_count(), 1);
        assert!(layout.container(a).unwrap().is_empty());
    }

    #[test]
    fn test_remove_activates_neighbor() {
        let mut layout = PaneLayout::new();
        let a = layout.main_pane();
        layout.add_tab(1, "one");
        layout.add_tab(2, "two");
        let t3 = layout.add_tab(3, "three");
        layout.set_active(a, 1);
        layout.close_tab(a, 1).unwrap();
        assert_eq!(layout.container(a).unwrap().active_tab().map(|t| t.id), Some(t3));
    }
}
