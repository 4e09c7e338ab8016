use {
    crate::{
        signal::{self, PointerEvent},
        surface, theme,
    },
    reclutch::display as gfx,
    std::{
        any::Any,
        collections::{HashMap, VecDeque},
    },
};

/// Core component trait, implemented by all distinct elements of a UI.
pub trait Component: AsBoxAny + 'static {
    /// Invoked right before the component is removed/deleted.
    ///
    /// Both the parent and the children still exist when this is called.
    #[inline]
    fn unmount(&mut self, _globals: &mut Globals) {}

    /// Invoked during rendering.
    ///
    /// The surface origin is set to the top-left of the component's bounds, so drawing should be done in local coordinates.
    /// Children are rendered after (on top of) their parent.
    #[inline]
    fn display(&self, _surface: &mut dyn surface::Surface) {}

    /// Invoked by [`Globals::update`](Globals::update), either as a result of propagation or directly.
    ///
    /// Update logic should be placed here.
    #[inline]
    fn update(&mut self, _globals: &mut Globals) {}

    /// The size a layout should give this component.
    #[inline]
    fn preferred_size(&self) -> gfx::Size {
        gfx::Size::new(0.0, 0.0)
    }

    /// Invoked when a layout assigns new bounds to the component.
    #[inline]
    fn resize(&mut self, _size: gfx::Size) {}

    /// Signal receiving pointer events, if this component accepts them.
    ///
    /// Components returning `None` are transparent to hit-testing.
    #[inline]
    fn pointer(&mut self) -> Option<&mut signal::Signal<PointerEvent>> {
        None
    }
}

impl<C: Component> AsBoxAny for C {
    #[inline]
    fn as_box_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Implemented by components capable of constructing themselves.
pub trait ComponentFactory: Sized + Component {
    /// Data handed over to the component at construction.
    type Props;

    /// Constructs a new component of type `Self`.
    ///
    /// `cref` is the reference to self component within `globals`.
    fn new(globals: &mut Globals, cref: ComponentRef<Self>, props: Self::Props) -> Self;
}

/// Strongly-typed reference to a component.
#[derive(Derivative)]
#[derivative(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
// don't constraint T
#[derivative(Debug(bound = ""))]
#[derivative(Clone(bound = ""))]
#[derivative(Copy(bound = ""))]
#[derivative(PartialEq(bound = ""))]
#[derivative(Eq(bound = ""))]
#[derivative(PartialOrd(bound = ""))]
#[derivative(Ord(bound = ""))]
#[derivative(Hash(bound = ""))]
pub struct ComponentRef<T: Component>(u64, std::marker::PhantomData<T>);

/// Untyped reference to a component.
///
/// Prefer the strongly-typed variant, [`ComponentRef`](ComponentRef), where possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UntypedComponentRef(u64);

/// Implemented by any type which references a node, strongly-typed or not.
pub trait CRef {
    /// Returns the underlying ID of the node.
    fn id(&self) -> u64;
}

impl<T: Component> CRef for ComponentRef<T> {
    #[inline]
    fn id(&self) -> u64 {
        self.0
    }
}

impl CRef for UntypedComponentRef {
    #[inline]
    fn id(&self) -> u64 {
        self.0
    }
}

impl<T: Component> From<ComponentRef<T>> for UntypedComponentRef {
    #[inline]
    fn from(cref: ComponentRef<T>) -> Self {
        UntypedComponentRef(cref.0)
    }
}

impl UntypedComponentRef {
    /// Attaches a type to the component reference.
    ///
    /// # Warning
    /// Call this sparingly and cautiously. It will cause a `panic` if an incorrect type is provided.
    #[inline]
    pub fn to_typed<T: Component>(self) -> ComponentRef<T> {
        ComponentRef(self.0, Default::default())
    }
}

#[doc(hidden)]
pub trait AsBoxAny {
    fn as_box_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Public interface for a UI node.
pub trait Node {
    /// Returns a reference to the parent component.
    ///
    /// The root component is its own parent.
    fn parent(&self) -> UntypedComponentRef;
    /// Returns a list of references to the child components.
    fn children(&self) -> &[UntypedComponentRef];
    /// Returns the bounds of the component, relative to the root.
    fn bounds(&self) -> gfx::Rect;
}

trait InternalNode: Node {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn as_node(&self) -> &dyn Node;

    fn take(&mut self) -> Box<dyn Component>;
    fn replace(&mut self, component: Box<dyn Component>);

    fn take_listeners(&mut self) -> Vec<Box<dyn Listener>>;
    fn push_child(&mut self, child: UntypedComponentRef);
    fn remove_child(&mut self, child: UntypedComponentRef);

    fn display(&self, surface: &mut dyn surface::Surface);
    fn preferred_size(&self) -> gfx::Size;
    fn set_bounds(&mut self, bounds: gfx::Rect);
    fn pointer(&mut self) -> Option<&mut signal::Signal<PointerEvent>>;
}

impl<T: Component> InternalNode for ComponentNode<T> {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn as_node(&self) -> &dyn Node {
        self
    }

    #[inline]
    fn take(&mut self) -> Box<dyn Component> {
        Box::new(
            self.component
                .take()
                .expect("component is already taken for update"),
        )
    }

    #[inline]
    fn replace(&mut self, component: Box<dyn Component>) {
        self.component = Some(
            *component
                .as_box_any()
                .downcast::<T>()
                .expect("mismatching component type"),
        );
    }

    #[inline]
    fn take_listeners(&mut self) -> Vec<Box<dyn Listener>> {
        std::mem::take(&mut self.listeners)
    }

    #[inline]
    fn push_child(&mut self, child: UntypedComponentRef) {
        self.children.push(child);
    }

    #[inline]
    fn remove_child(&mut self, child: UntypedComponentRef) {
        self.children.retain(|c| *c != child);
    }

    #[inline]
    fn display(&self, surface: &mut dyn surface::Surface) {
        if let Some(component) = &self.component {
            component.display(surface);
        }
    }

    #[inline]
    fn preferred_size(&self) -> gfx::Size {
        self.component
            .as_ref()
            .map(Component::preferred_size)
            .unwrap_or_else(|| gfx::Size::new(0.0, 0.0))
    }

    fn set_bounds(&mut self, bounds: gfx::Rect) {
        self.bounds = bounds;
        if let Some(component) = &mut self.component {
            component.resize(bounds.size);
        }
    }

    #[inline]
    fn pointer(&mut self) -> Option<&mut signal::Signal<PointerEvent>> {
        self.component.as_mut().and_then(Component::pointer)
    }
}

impl<T: Component> Node for ComponentNode<T> {
    #[inline]
    fn parent(&self) -> UntypedComponentRef {
        self.parent
    }

    #[inline]
    fn children(&self) -> &[UntypedComponentRef] {
        &self.children
    }

    #[inline]
    fn bounds(&self) -> gfx::Rect {
        self.bounds
    }
}

struct ListenerPair<S: Component, T, F: FnMut(&mut S) -> &mut signal::Signal<T>> {
    listener: signal::ListenerRef,
    source: ComponentRef<S>,
    signal_lens: F,
    _event: std::marker::PhantomData<T>,
}

trait Listener {
    fn detach(&mut self, globals: &mut Globals);
}

impl<S: Component, T, F: FnMut(&mut S) -> &mut signal::Signal<T>> Listener
    for ListenerPair<S, T, F>
{
    fn detach(&mut self, globals: &mut Globals) {
        // the source may have been unmounted on its own already, taking its signal with it
        if globals.contains(self.source) {
            (self.signal_lens)(globals.get_mut(self.source)).remove_listener(self.listener);
        }
    }
}

/// UI node storing the `Component` type and surrounding relevant node references.
pub struct ComponentNode<T: Component> {
    parent: UntypedComponentRef,
    children: Vec<UntypedComponentRef>,
    component: Option<T>,
    listeners: Vec<Box<dyn Listener>>,
    bounds: gfx::Rect,
}

impl<T: Component> ComponentNode<T> {
    fn new(parent: UntypedComponentRef) -> Self {
        ComponentNode {
            parent,
            children: Vec::new(),
            component: None,
            listeners: Vec::new(),
            bounds: gfx::Rect::new(gfx::Point::new(0.0, 0.0), gfx::Size::new(0.0, 0.0)),
        }
    }
}

/// Whether a repaint should be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Repaint {
    Yes,
    No,
}

impl Default for Repaint {
    fn default() -> Self {
        Repaint::Yes
    }
}

/// Whether an invocation should be recursively propagated to children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Propagate {
    Yes,
    No,
}

impl Default for Propagate {
    fn default() -> Self {
        Propagate::Yes
    }
}

/// Whether an update should be invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Update {
    Yes(Repaint, Propagate),
    No,
}

impl Default for Update {
    fn default() -> Self {
        Update::Yes(Default::default(), Default::default())
    }
}

type Task = Box<dyn FnOnce(&mut Globals)>;

pub struct Globals {
    map: HashMap<u64, Box<dyn InternalNode>>,
    next_id: u64,
    theme: Box<dyn theme::Theme>,
    tasks: VecDeque<Task>,
    hovered: Option<UntypedComponentRef>,
    pressed: Option<UntypedComponentRef>,
    repaint: bool,
}

impl Globals {
    /// Creates a new `Globals` with a root component and initial theme.
    pub fn new<T: ComponentFactory>(
        theme: impl theme::Theme + 'static,
        props: T::Props,
    ) -> (Self, ComponentRef<T>) {
        let mut globals = Globals {
            map: Default::default(),
            next_id: 0,
            theme: Box::new(theme),
            tasks: Default::default(),
            hovered: None,
            pressed: None,
            repaint: true,
        };

        let root = ComponentRef(globals.next_id, Default::default());
        globals.next_id += 1;
        globals.map.insert(
            root.0,
            Box::new(ComponentNode::<T>::new(UntypedComponentRef(root.0))),
        );

        globals.node_mut(root).component = Some(T::new(&mut globals, root, props));

        (globals, root)
    }

    /// Immutably retrieves the `Component` behind a reference.
    #[inline]
    pub fn get<T: Component>(&self, cref: ComponentRef<T>) -> &T {
        self.node(cref)
            .component
            .as_ref()
            .expect("component is `self`; use `self` instead")
    }

    /// Mutably retrieves the `Component` behind a reference.
    #[inline]
    pub fn get_mut<T: Component>(&mut self, cref: ComponentRef<T>) -> &mut T {
        self.node_mut(cref)
            .component
            .as_mut()
            .expect("component is `self`; use `self` instead")
    }

    /// Immutably retrieves the `ComponentNode` behind a reference.
    pub fn node<T: Component>(&self, cref: ComponentRef<T>) -> &ComponentNode<T> {
        self.map
            .get(&cref.0)
            .expect("invalid reference")
            .as_any()
            .downcast_ref::<ComponentNode<T>>()
            .expect("mismatching reference type")
    }

    /// Mutably retrieves the `ComponentNode` behind a reference.
    pub fn node_mut<T: Component>(&mut self, cref: ComponentRef<T>) -> &mut ComponentNode<T> {
        self.map
            .get_mut(&cref.0)
            .expect("invalid reference")
            .as_any_mut()
            .downcast_mut::<ComponentNode<T>>()
            .expect("mismatching reference type")
    }

    /// Returns an immutable dynamic reference to a node behind a component reference.
    #[inline]
    pub fn untyped_node(&self, cref: impl CRef) -> &dyn Node {
        self.untyped_internal_node(&cref).as_node()
    }

    /// Returns `true` if `cref` still refers to a mounted component.
    #[inline]
    pub fn contains(&self, cref: impl CRef) -> bool {
        self.map.contains_key(&cref.id())
    }

    /// Unmounts and removes a component node (and it's children).
    ///
    /// Unmount callbacks run parent first. Managed listeners are detached before each node is erased.
    pub fn unmount(&mut self, cref: impl CRef) {
        let id = cref.id();
        let parent = self.untyped_internal_node(&cref).parent();
        if parent.id() != id {
            if let Some(parent) = self.map.get_mut(&parent.id()) {
                parent.remove_child(UntypedComponentRef(id));
            }
        }

        self.unmount_impl(UntypedComponentRef(id));
    }

    /// Creates a new component as a child of an existing component.
    pub fn child<T: ComponentFactory>(&mut self, pcref: impl CRef, props: T::Props) -> ComponentRef<T> {
        let cref = ComponentRef(self.next_id, Default::default());
        self.next_id += 1;

        self.untyped_internal_node_mut(&pcref)
            .push_child(UntypedComponentRef(cref.0));
        self.map.insert(
            cref.0,
            Box::new(ComponentNode::<T>::new(UntypedComponentRef(pcref.id()))),
        );

        self.node_mut(cref).component = Some(T::new(self, cref, props));

        tracing::debug!(
            id = cref.0,
            parent = pcref.id(),
            component = std::any::type_name::<T>(),
            "mounted component"
        );

        cref
    }

    /// Adds a managed listener to a signal.
    ///
    /// "Managed" implies that the listener will be removed when `cref` is unmounted.
    /// `signal_lens` selects the signal out of the `source` component.
    pub fn listen<C: Component, S: Component, T: 'static>(
        &mut self,
        cref: ComponentRef<C>,
        source: ComponentRef<S>,
        mut signal_lens: impl FnMut(&mut S) -> &mut signal::Signal<T> + 'static,
        mut listener: impl FnMut(&mut Globals, &T) + 'static,
        update: Update,
    ) {
        let listener = signal_lens(self.get_mut(source)).listen(move |globals, event| {
            listener(globals, event);
            if let Update::Yes(repaint, propagate) = update {
                globals.update(cref, repaint, propagate);
            }
        });
        self.node_mut(cref).listeners.push(Box::new(ListenerPair {
            listener,
            source,
            signal_lens,
            _event: Default::default(),
        }));
    }

    /// Invokes an update for a specified component, optionally recursively propagating to children and scheduling a repaint.
    pub fn update(&mut self, cref: impl CRef, repaint: Repaint, propagate: Propagate) {
        let mut component = self.untyped_internal_node_mut(&cref).take();
        component.update(self);
        self.untyped_internal_node_mut(&cref).replace(component);

        if Repaint::Yes == repaint {
            self.repaint = true;
        }

        if Propagate::Yes == propagate {
            for child in self.untyped_internal_node(&cref).children().to_vec() {
                self.update(child, repaint, propagate);
            }
        }
    }

    /// Returns `true` if a repaint was scheduled since the last call, clearing the request.
    #[inline]
    pub fn take_repaint(&mut self) -> bool {
        std::mem::replace(&mut self.repaint, false)
    }

    /// Resolves a color from the current theme.
    #[inline]
    pub fn color(&self, c: theme::ThemeColor) -> gfx::Color {
        self.theme.color(c)
    }

    /// Queues a task to run on the UI thread the next time [`run_pending`](Globals::run_pending) is called.
    pub fn invoke_later(&mut self, task: impl FnOnce(&mut Globals) + 'static) {
        self.tasks.push_back(Box::new(task));
    }

    /// Runs queued tasks, including any queued while running, returning how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.tasks.pop_front() {
            task(self);
            ran += 1;
        }
        if ran > 0 {
            tracing::trace!(ran, "ran pending tasks");
        }
        ran
    }

    /// Returns the preferred size of a component.
    #[inline]
    pub fn preferred_size(&self, cref: impl CRef) -> gfx::Size {
        self.untyped_internal_node(&cref).preferred_size()
    }

    /// Returns the bounds of a component, relative to the root.
    #[inline]
    pub fn bounds(&self, cref: impl CRef) -> gfx::Rect {
        self.untyped_internal_node(&cref).bounds()
    }

    /// Assigns the bounds, relative to the root, of a component.
    #[inline]
    pub fn set_bounds(&mut self, cref: impl CRef, bounds: gfx::Rect) {
        self.untyped_internal_node_mut(&cref).set_bounds(bounds);
    }

    /// Renders a component and its descendants onto `surface`.
    pub fn render(&self, cref: impl CRef, surface: &mut dyn surface::Surface) {
        let node = self.untyped_internal_node(&cref);
        surface.set_origin(node.bounds().origin);
        node.display(surface);
        for child in node.children() {
            self.render(*child, surface);
        }
    }

    /// Renders a component and its descendants into a display list.
    ///
    /// Text is left out when no `typeface` is given.
    pub fn display_list(
        &self,
        cref: impl CRef,
        typeface: Option<&surface::Typeface>,
    ) -> Vec<gfx::DisplayCommand> {
        let mut surface = surface::DisplayListSurface::new(typeface);
        self.render(cref, &mut surface);
        surface.build()
    }

    /// Returns the deepest component under `position` which accepts pointer events.
    pub fn hit_test(&mut self, root: impl CRef, position: gfx::Point) -> Option<UntypedComponentRef> {
        let children = self.map.get(&root.id())?.children().to_vec();
        for child in children.into_iter().rev() {
            if let Some(hit) = self.hit_test(child, position) {
                return Some(hit);
            }
        }

        let node = self.map.get_mut(&root.id())?;
        if contains(node.bounds(), position) && node.pointer().is_some() {
            Some(UntypedComponentRef(root.id()))
        } else {
            None
        }
    }

    /// Handles the pointer moving to `position`, emitting enter/exit events as the hovered component changes.
    pub fn pointer_moved(&mut self, root: impl CRef, position: gfx::Point) {
        let hit = self.hit_test(root, position);
        if hit == self.hovered {
            return;
        }

        if let Some(old) = std::mem::replace(&mut self.hovered, hit) {
            self.emit_pointer(old, PointerEvent::Exited);
        }
        if let Some(new) = hit {
            self.emit_pointer(new, PointerEvent::Entered);
        }
    }

    /// Handles the primary pointer button going down at `position`.
    pub fn pointer_pressed(&mut self, root: impl CRef, position: gfx::Point) {
        self.pressed = self.hit_test(root, position);
        if let Some(target) = self.pressed {
            let local = self.to_local(target, position);
            self.emit_pointer(target, PointerEvent::Pressed(local));
        }
    }

    /// Handles the primary pointer button going up at `position`.
    ///
    /// The release goes to the component which received the press, followed by a click if the pointer is still over it.
    pub fn pointer_released(&mut self, root: impl CRef, position: gfx::Point) {
        let target = match self.pressed.take() {
            Some(target) if self.map.contains_key(&target.id()) => target,
            _ => return,
        };

        let local = self.to_local(target, position);
        self.emit_pointer(target, PointerEvent::Released(local));

        if self.hit_test(root, position) == Some(target) {
            self.emit_pointer(target, PointerEvent::Clicked(local));
        }
    }

    fn to_local(&self, cref: impl CRef, position: gfx::Point) -> gfx::Point {
        let origin = self.untyped_internal_node(&cref).bounds().origin;
        gfx::Point::new(position.x - origin.x, position.y - origin.y)
    }

    fn emit_pointer(&mut self, target: UntypedComponentRef, event: PointerEvent) {
        let mut signal = match self.map.get_mut(&target.0).and_then(|node| node.pointer()) {
            Some(signal) => std::mem::take(signal),
            None => return,
        };

        tracing::trace!(id = target.0, ?event, "dispatching pointer event");
        signal.emit(self, &event);

        if let Some(slot) = self.map.get_mut(&target.0).and_then(|node| node.pointer()) {
            *slot = signal;
        }
    }

    fn unmount_impl(&mut self, cref: UntypedComponentRef) {
        let mut component = self.untyped_internal_node_mut(&cref).take();
        component.unmount(self);
        self.untyped_internal_node_mut(&cref).replace(component);

        let children = self.untyped_internal_node(&cref).children().to_vec();

        for mut listener in self.untyped_internal_node_mut(&cref).take_listeners() {
            listener.detach(self);
        }
        self.map.remove(&cref.0);

        if self.hovered == Some(cref) {
            self.hovered = None;
        }
        if self.pressed == Some(cref) {
            self.pressed = None;
        }

        tracing::debug!(id = cref.0, "unmounted component");

        for child in children {
            self.unmount_impl(child);
        }
    }

    #[inline]
    fn untyped_internal_node(&self, cref: &impl CRef) -> &Box<dyn InternalNode> {
        self.map.get(&cref.id()).expect("invalid reference")
    }

    #[inline]
    fn untyped_internal_node_mut(&mut self, cref: &impl CRef) -> &mut Box<dyn InternalNode> {
        self.map.get_mut(&cref.id()).expect("invalid reference")
    }
}

fn contains(rect: gfx::Rect, point: gfx::Point) -> bool {
    point.x >= rect.origin.x
        && point.y >= rect.origin.y
        && point.x < rect.origin.x + rect.size.width
        && point.y < rect.origin.y + rect.size.height
}
