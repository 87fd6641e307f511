//! Native Win32 host for the list view
//!
//! `NativeListView` binds an `AeroListView` to a `SysListView32` child
//! control: it subclasses the control so right-button presses reach the
//! fast context menu, applies the visual theme once the handle exists, and
//! mirrors the model's rows into the native control after every update.
//!
//! `create_and_run` opens a top-level window hosting one list and runs the
//! message loop; the demo binary uses it.

use crate::config::{ColumnConfig, Config, ListConfig};
use crate::context_menu::{FastContextMenu, MenuItemId};
use crate::error::{AeroListError, Result};
use crate::events::{
    HandleReadyHandler, MenuPresenter, MouseButton, Point, PointerDownHandler, PointerEvent,
    ThemeHost,
};
use crate::list_view::{AeroListView, ControlStyle, ViewMode};
use crate::utils::{point_from_lparam, to_wide_string};
use std::cell::{Ref, RefCell};
use std::mem;
use std::rc::Rc;
use windows::core::{w, PCWSTR, PWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{ClientToScreen, InvalidateRect, COLOR_WINDOW, HBRUSH};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Controls::{
    InitCommonControlsEx, SetWindowTheme, ICC_LISTVIEW_CLASSES, INITCOMMONCONTROLSEX, LVCF_SUBITEM,
    LVCF_TEXT, LVCF_WIDTH, LVCOLUMNW, LVIF_PARAM, LVIF_TEXT, LVITEMW, LVM_DELETEALLITEMS,
    LVM_INSERTCOLUMNW, LVM_INSERTITEMW, LVM_SETEXTENDEDLISTVIEWSTYLE, LVM_SETITEMTEXTW,
    LVN_GETINFOTIPW, LVS_EX_DOUBLEBUFFER, LVS_EX_FULLROWSELECT, LVS_EX_INFOTIP, LVS_EX_LABELTIP,
    LVS_ICON, LVS_LIST, LVS_REPORT, LVS_SHOWSELALWAYS, LVS_SMALLICON, NMHDR, NMLVGETINFOTIPW,
};
use windows::Win32::UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, CreateWindowExW, DefWindowProcW, DestroyMenu, DispatchMessageW,
    GetClientRect, GetMessageW, GetWindowLongPtrW, LoadCursorW, MoveWindow, PostQuitMessage,
    RegisterClassExW, SendMessageW, SetWindowLongPtrW, ShowWindow, TrackPopupMenu, TranslateMessage,
    CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, GWLP_USERDATA, HMENU, IDC_ARROW, MF_STRING, MSG,
    SW_SHOW, TPM_LEFTALIGN, TPM_RETURNCMD, TPM_RIGHTBUTTON, TPM_TOPALIGN, WINDOW_EX_STYLE,
    WINDOW_STYLE, WM_CREATE, WM_DESTROY, WM_NCDESTROY, WM_NOTIFY, WM_RBUTTONDOWN, WM_SETREDRAW,
    WM_SIZE, WNDCLASSEXW, WS_BORDER, WS_CHILD, WS_OVERLAPPEDWINDOW, WS_TABSTOP, WS_VISIBLE,
};

/// Window class name of the demo host window
const CLASS_NAME: &str = "AeroListHostWindow";

/// Control id of the hosted list
const LIST_CONTROL_ID: u16 = 100;

/// Subclass id passed to SetWindowSubclass
const LIST_SUBCLASS_ID: usize = 1;

/// Shows the fast context menu with TrackPopupMenu
struct PopupMenuPresenter {
    hwnd: HWND,
}

impl MenuPresenter for PopupMenuPresenter {
    fn show_menu(&mut self, menu: &FastContextMenu, at: Point) -> Option<MenuItemId> {
        unsafe {
            let hmenu = match CreatePopupMenu() {
                Ok(hmenu) => hmenu,
                Err(e) => {
                    log::warn!("CreatePopupMenu failed: {}", e);
                    return None;
                }
            };

            for (command, item) in menu.commands() {
                let text = to_wide_string(item.text());
                if let Err(e) = AppendMenuW(
                    hmenu,
                    MF_STRING,
                    usize::from(command),
                    PCWSTR(text.as_ptr()),
                ) {
                    log::warn!("Failed to append menu item {:?}: {}", item.text(), e);
                }
            }

            let mut pt = POINT { x: at.x, y: at.y };
            let _ = ClientToScreen(self.hwnd, &mut pt);

            let command = TrackPopupMenu(
                hmenu,
                TPM_LEFTALIGN | TPM_TOPALIGN | TPM_RIGHTBUTTON | TPM_RETURNCMD,
                pt.x,
                pt.y,
                0,
                self.hwnd,
                None,
            );
            let _ = DestroyMenu(hmenu);

            u32::try_from(command.0)
                .ok()
                .and_then(|command| menu.id_for_command(command))
        }
    }
}

/// Applies themes with SetWindowTheme
struct NativeTheme {
    hwnd: HWND,
}

impl ThemeHost for NativeTheme {
    fn apply_theme(&mut self, sub_app_name: &str) -> bool {
        let name = to_wide_string(sub_app_name);
        unsafe { SetWindowTheme(self.hwnd, PCWSTR(name.as_ptr()), PCWSTR::null()).is_ok() }
    }
}

/// Window style bits for the fixed control style
fn window_style(style: ControlStyle) -> WINDOW_STYLE {
    let view = match style.view {
        ViewMode::LargeIcon => LVS_ICON,
        ViewMode::SmallIcon => LVS_SMALLICON,
        ViewMode::List => LVS_LIST,
        ViewMode::Details => LVS_REPORT,
    };

    let mut ws = WS_CHILD | WS_VISIBLE | WS_TABSTOP | WINDOW_STYLE(view | LVS_SHOWSELALWAYS);
    if style.border {
        ws |= WS_BORDER;
    }
    ws
}

/// Extended list view style bits for the fixed control style
fn extended_list_style(style: ControlStyle) -> u32 {
    let mut ex = 0;
    if style.double_buffered {
        ex |= LVS_EX_DOUBLEBUFFER;
    }
    if style.full_row_select {
        ex |= LVS_EX_FULLROWSELECT;
    }
    if style.show_item_tooltips {
        ex |= LVS_EX_INFOTIP | LVS_EX_LABELTIP;
    }
    ex
}

/// An `AeroListView` hosted in a native list control
pub struct NativeListView {
    hwnd: HWND,
    list: RefCell<AeroListView>,
}

impl NativeListView {
    /// Creates the native control as a child of `parent`
    ///
    /// The returned `Rc` must outlive the native control; dropping it
    /// detaches the subclass.
    pub fn create(parent: HWND, config: &ListConfig) -> Result<Rc<Self>> {
        let mut list = AeroListView::with_theme(config.theme.clone());
        list.set_enable_fast_context_menu(config.enable_fast_context_menu);
        let style = list.style();

        unsafe {
            let icc = INITCOMMONCONTROLSEX {
                dwSize: mem::size_of::<INITCOMMONCONTROLSEX>() as u32,
                dwICC: ICC_LISTVIEW_CLASSES,
            };
            if !InitCommonControlsEx(&icc).as_bool() {
                log::warn!("InitCommonControlsEx failed");
            }

            let hinstance = GetModuleHandleW(PCWSTR::null())?;

            let hwnd = CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                w!("SysListView32"),
                PCWSTR::null(),
                window_style(style),
                0,
                0,
                0,
                0,
                parent,
                HMENU(LIST_CONTROL_ID as usize as *mut _),
                hinstance,
                None,
            )
            .map_err(|e| {
                AeroListError::window_creation(format!("CreateWindowEx(list) failed: {:?}", e))
            })?;

            let ex = extended_list_style(style) as usize;
            SendMessageW(
                hwnd,
                LVM_SETEXTENDEDLISTVIEWSTYLE,
                WPARAM(ex),
                LPARAM(ex as isize),
            );

            let host = Rc::new(Self {
                hwnd,
                list: RefCell::new(list),
            });

            if !SetWindowSubclass(
                hwnd,
                Some(list_subclass_proc),
                LIST_SUBCLASS_ID,
                Rc::as_ptr(&host) as usize,
            )
            .as_bool()
            {
                return Err(AeroListError::window_creation("SetWindowSubclass failed"));
            }

            host.list
                .borrow_mut()
                .on_handle_ready(&mut NativeTheme { hwnd });
            host.insert_columns(&config.columns);

            log::debug!("Created native list view with {} columns", config.columns.len());
            Ok(host)
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Read access to the model
    pub fn list(&self) -> Ref<'_, AeroListView> {
        self.list.borrow()
    }

    /// Modifies the model and mirrors the result into the native control
    ///
    /// Must not be called from inside another `update` on the same list.
    pub fn update<R>(&self, f: impl FnOnce(&mut AeroListView) -> R) -> R {
        let result = f(&mut self.list.borrow_mut());
        self.sync_rows();
        result
    }

    /// Moves and resizes the control within its parent
    pub fn set_bounds(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe {
            let _ = MoveWindow(self.hwnd, x, y, width, height, true);
        }
    }

    fn insert_columns(&self, columns: &[ColumnConfig]) {
        for (index, column) in columns.iter().enumerate() {
            let mut name = to_wide_string(&column.name);
            let lvc = LVCOLUMNW {
                mask: LVCF_TEXT | LVCF_WIDTH | LVCF_SUBITEM,
                cx: column.width as i32,
                pszText: PWSTR(name.as_mut_ptr()),
                iSubItem: index as i32,
                ..Default::default()
            };
            unsafe {
                SendMessageW(
                    self.hwnd,
                    LVM_INSERTCOLUMNW,
                    WPARAM(index),
                    LPARAM(&lvc as *const _ as isize),
                );
            }
        }
    }

    /// Rebuilds the native rows from the model
    fn sync_rows(&self) {
        let list = self.list.borrow();

        unsafe {
            SendMessageW(self.hwnd, WM_SETREDRAW, WPARAM(0), LPARAM(0));
            SendMessageW(self.hwnd, LVM_DELETEALLITEMS, WPARAM(0), LPARAM(0));

            for (row, item) in list.items().iter().enumerate() {
                let mut text = to_wide_string(item.text());
                let lvi = LVITEMW {
                    mask: LVIF_TEXT | LVIF_PARAM,
                    iItem: row as i32,
                    iSubItem: 0,
                    pszText: PWSTR(text.as_mut_ptr()),
                    lParam: LPARAM(item.id().value() as isize),
                    ..Default::default()
                };
                let inserted = SendMessageW(
                    self.hwnd,
                    LVM_INSERTITEMW,
                    WPARAM(0),
                    LPARAM(&lvi as *const _ as isize),
                );
                if inserted.0 < 0 {
                    log::warn!("Failed to insert row {} ({})", row, item.id());
                    continue;
                }

                for (column, sub_text) in item.columns().iter().enumerate().skip(1) {
                    let mut sub_text = to_wide_string(sub_text);
                    let sub = LVITEMW {
                        iSubItem: column as i32,
                        pszText: PWSTR(sub_text.as_mut_ptr()),
                        ..Default::default()
                    };
                    SendMessageW(
                        self.hwnd,
                        LVM_SETITEMTEXTW,
                        WPARAM(inserted.0 as usize),
                        LPARAM(&sub as *const _ as isize),
                    );
                }
            }

            SendMessageW(self.hwnd, WM_SETREDRAW, WPARAM(1), LPARAM(0));
            let _ = InvalidateRect(self.hwnd, None, true);
        }

        log::trace!("Synchronised {} native rows", list.len());
    }

    /// Answers LVN_GETINFOTIP with the row's tooltip text
    ///
    /// # Safety
    /// `tip` must point at the notification structure the control sent.
    unsafe fn fill_info_tip(&self, tip: &mut NMLVGETINFOTIPW) {
        let Ok(list) = self.list.try_borrow() else {
            return;
        };
        let Some(text) = usize::try_from(tip.iItem)
            .ok()
            .and_then(|row| list.items().get(row))
            .and_then(|item| item.tooltip_text())
        else {
            return;
        };

        let capacity = usize::try_from(tip.cchTextMax).unwrap_or(0);
        if capacity == 0 || tip.pszText.is_null() {
            return;
        }

        let wide: Vec<u16> = text.encode_utf16().take(capacity - 1).collect();
        std::ptr::copy_nonoverlapping(wide.as_ptr(), tip.pszText.0, wide.len());
        *tip.pszText.0.add(wide.len()) = 0;
    }

    /// Shows the fast context menu for a right-button press, then clicks the
    /// chosen entry once the model is no longer borrowed
    fn handle_right_button(&self, at: Point) {
        let event = PointerEvent {
            button: MouseButton::Right,
            position: at,
        };
        let mut presenter = PopupMenuPresenter { hwnd: self.hwnd };

        let chosen = match self.list.try_borrow_mut() {
            Ok(mut list) => list.on_pointer_down(&event, &mut presenter),
            Err(_) => {
                log::warn!("Right click while the list is being updated, ignored");
                return;
            }
        };

        if let Some(item) = chosen {
            log::debug!("Fast context menu item {:?} chosen", item.text());
            item.click();
        }
    }
}

impl Drop for NativeListView {
    fn drop(&mut self) {
        unsafe {
            let _ = RemoveWindowSubclass(self.hwnd, Some(list_subclass_proc), LIST_SUBCLASS_ID);
        }
    }
}

unsafe extern "system" fn list_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _subclass_id: usize,
    ref_data: usize,
) -> LRESULT {
    match msg {
        WM_RBUTTONDOWN => {
            // Regular press handling (selection, focus) runs first
            let result = DefSubclassProc(hwnd, msg, wparam, lparam);
            let host = ref_data as *const NativeListView;
            if !host.is_null() {
                (*host).handle_right_button(point_from_lparam(lparam.0));
            }
            result
        }

        WM_NCDESTROY => {
            let _ = RemoveWindowSubclass(hwnd, Some(list_subclass_proc), LIST_SUBCLASS_ID);
            DefSubclassProc(hwnd, msg, wparam, lparam)
        }

        _ => DefSubclassProc(hwnd, msg, wparam, lparam),
    }
}

/// Host window state
struct WindowState {
    list: Option<Rc<NativeListView>>,
}

/// Creates the host window, lets `setup` populate the list, and runs the
/// message loop until the window is closed
pub fn create_and_run<F>(config: Config, setup: F) -> Result<()>
where
    F: FnOnce(&Rc<NativeListView>) -> Result<()>,
{
    let class_name = to_wide_string(CLASS_NAME);
    let title = to_wide_string(&config.window.title);

    unsafe {
        let hinstance = GetModuleHandleW(PCWSTR::null())?;

        let wc = WNDCLASSEXW {
            cbSize: mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(window_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: hinstance.into(),
            hIcon: Default::default(),
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as usize as *mut _),
            lpszMenuName: PCWSTR::null(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            hIconSm: Default::default(),
        };

        if RegisterClassExW(&wc) == 0 {
            return Err(AeroListError::WindowClassRegistration(
                "Failed to register window class".to_string(),
            ));
        }

        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            PCWSTR(class_name.as_ptr()),
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            config.window.width as i32,
            config.window.height as i32,
            HWND::default(),
            HMENU::default(),
            hinstance,
            None,
        )
        .map_err(|e| AeroListError::window_creation(format!("CreateWindowEx failed: {:?}", e)))?;

        let list = NativeListView::create(hwnd, &config.list)?;
        setup(&list)?;

        let state = Box::new(WindowState { list: Some(list) });
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(state) as isize);

        let _ = ShowWindow(hwnd, SW_SHOW);
        layout(hwnd);

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, HWND::default(), 0, 0).into() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        Ok(())
    }
}

unsafe fn get_window_state(hwnd: HWND) -> Option<&'static mut WindowState> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WindowState;
    if ptr.is_null() {
        None
    } else {
        Some(&mut *ptr)
    }
}

/// Stretches the list over the client area
unsafe fn layout(hwnd: HWND) {
    let mut rect = RECT::default();
    let _ = GetClientRect(hwnd, &mut rect);

    if let Some(list) = get_window_state(hwnd).and_then(|state| state.list.as_ref()) {
        list.set_bounds(0, 0, rect.right - rect.left, rect.bottom - rect.top);
    }
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CREATE => {
            log::debug!("Host window created");
            LRESULT(0)
        }

        WM_SIZE => {
            layout(hwnd);
            LRESULT(0)
        }

        WM_NOTIFY => {
            let hdr = &*(lparam.0 as *const NMHDR);
            if let Some(list) = get_window_state(hwnd).and_then(|state| state.list.as_ref()) {
                if hdr.hwndFrom == list.hwnd() && hdr.code == LVN_GETINFOTIPW {
                    list.fill_info_tip(&mut *(lparam.0 as *mut NMLVGETINFOTIPW));
                }
            }
            LRESULT(0)
        }

        WM_DESTROY => {
            let state_ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WindowState;
            if !state_ptr.is_null() {
                SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
                drop(Box::from_raw(state_ptr));
            }
            PostQuitMessage(0);
            LRESULT(0)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
