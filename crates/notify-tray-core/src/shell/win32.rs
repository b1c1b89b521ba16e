//! `windows-sys` implementation of [`Shell`].
//!
//! All message windows share one window procedure. It finds the owning
//! instance in a per-thread table keyed by window handle; windows are only
//! ever used from the thread that created them.
//!
//! Windows are created under `HWND_MESSAGE`. Such windows are skipped by
//! `HWND_BROADCAST`, so `TaskbarCreated` from an Explorer restart does not
//! reach them.

use crate::{
    Disposition, Icon, ImageHandle, ImageKind, Message, MessageHandler, NotifyIcon, NotifyOp,
    Shell, TrayDescriptor, TrayResult, WindowHandle,
};

use std::{
    cell::RefCell,
    collections::HashMap,
    ffi::OsStr,
    num::NonZeroU32,
    os::windows::ffi::OsStrExt,
    path::Path,
    ptr,
    rc::Weak,
    sync::OnceLock,
};

use tracing::{debug, warn};
use windows_sys::Win32::{
    Foundation::{GetLastError, HWND, LPARAM, LRESULT, WPARAM},
    Graphics::Gdi::{DeleteObject, HGDIOBJ},
    System::LibraryLoader::GetModuleHandleW,
    UI::{
        Shell::{
            NIM_ADD, NIM_DELETE, NIM_MODIFY, NIM_SETVERSION, NOTIFYICONDATAW, Shell_NotifyIconW,
        },
        WindowsAndMessaging::{
            CreateWindowExW, DefWindowProcW, DestroyCursor, DestroyIcon, DestroyWindow,
            DispatchMessageW, GetMessageW, HCURSOR, HICON, HWND_MESSAGE, IMAGE_BITMAP,
            IMAGE_CURSOR, IMAGE_ICON, LR_LOADFROMFILE, LoadImageW, MSG, PostMessageW,
            PostQuitMessage, RegisterClassW, RegisterWindowMessageW, TranslateMessage, WM_CLOSE,
            WM_NCDESTROY, WNDCLASSW,
        },
    },
};

/// Registered once per process, shared by every instance.
static TASKBAR_CREATED: OnceLock<u32> = OnceLock::new();

thread_local! {
    static TARGETS: RefCell<HashMap<isize, Weak<dyn MessageHandler>>> =
        RefCell::new(HashMap::new());
}

/// The Win32 shell, image loader and windowing subsystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Shell;

fn wide(text: &OsStr) -> Vec<u16> {
    text.encode_wide().chain(std::iter::once(0)).collect()
}

fn last_error() -> u32 {
    unsafe { GetLastError() }
}

fn hwnd(window: WindowHandle) -> HWND {
    window.0 as HWND
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let key = hwnd as isize;
    let target = TARGETS.with(|targets| targets.borrow().get(&key).and_then(Weak::upgrade));

    // The strong reference outlives the call even if the owner is dropped in it.
    if let Some(handler) = target {
        if handler.handle(Message::new(msg, wparam, lparam)) == Disposition::Handled {
            return 0;
        }
    }

    if msg == WM_NCDESTROY {
        TARGETS.with(|targets| targets.borrow_mut().remove(&key));
    }

    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

impl Shell for Win32Shell {
    fn load_image(&self, path: &Path, kind: ImageKind) -> Result<ImageHandle, u32> {
        let image_type = match kind {
            ImageKind::Icon => IMAGE_ICON,
            ImageKind::Bitmap => IMAGE_BITMAP,
            ImageKind::Cursor => IMAGE_CURSOR,
        };
        let path = wide(path.as_os_str());

        let handle = unsafe {
            LoadImageW(
                ptr::null_mut(),
                path.as_ptr(),
                image_type,
                0,
                0,
                LR_LOADFROMFILE,
            )
        };

        if handle.is_null() {
            return Err(last_error());
        }

        Ok(ImageHandle(handle as isize))
    }

    fn release_image(&self, handle: ImageHandle, kind: ImageKind) {
        let released = unsafe {
            match kind {
                ImageKind::Icon => DestroyIcon(handle.0 as HICON),
                ImageKind::Cursor => DestroyCursor(handle.0 as HCURSOR),
                ImageKind::Bitmap => DeleteObject(handle.0 as HGDIOBJ),
            }
        };

        if released == 0 {
            warn!(handle = ?handle, kind = ?kind, code = last_error(), "Failed to release image");
        }
    }

    fn register_class(&self, class_name: &str) -> Result<(), u32> {
        let class_name = wide(OsStr::new(class_name));

        // SAFETY: an all-zero WNDCLASSW is a valid "no options" value.
        let mut class: WNDCLASSW = unsafe { std::mem::zeroed() };
        class.lpfnWndProc = Some(window_proc);
        class.hInstance = unsafe { GetModuleHandleW(ptr::null()) };
        class.lpszClassName = class_name.as_ptr();

        if unsafe { RegisterClassW(&class) } == 0 {
            return Err(last_error());
        }

        Ok(())
    }

    fn create_window(
        &self,
        class_name: &str,
        target: Weak<dyn MessageHandler>,
    ) -> Result<WindowHandle, u32> {
        let class_name = wide(OsStr::new(class_name));
        let title = wide(OsStr::new(""));

        let hwnd = unsafe {
            CreateWindowExW(
                0,
                class_name.as_ptr(),
                title.as_ptr(),
                0,
                0,
                0,
                0,
                0,
                HWND_MESSAGE,
                ptr::null_mut(),
                GetModuleHandleW(ptr::null()),
                ptr::null(),
            )
        };

        if hwnd.is_null() {
            return Err(last_error());
        }

        TARGETS.with(|targets| targets.borrow_mut().insert(hwnd as isize, target));

        Ok(WindowHandle(hwnd as isize))
    }

    fn destroy_window(&self, window: WindowHandle) -> Result<(), u32> {
        let destroyed = unsafe { DestroyWindow(hwnd(window)) } != 0;
        let code = last_error();

        TARGETS.with(|targets| targets.borrow_mut().remove(&window.0));

        if !destroyed {
            return Err(code);
        }

        Ok(())
    }

    fn post_close(&self, window: WindowHandle) -> Result<(), u32> {
        if unsafe { PostMessageW(hwnd(window), WM_CLOSE, 0, 0) } == 0 {
            return Err(last_error());
        }

        Ok(())
    }

    fn post_quit(&self, exit_code: i32) {
        unsafe { PostQuitMessage(exit_code) };
    }

    fn notify(&self, op: NotifyOp, descriptor: &TrayDescriptor) -> Result<(), u32> {
        // SAFETY: NOTIFYICONDATAW is plain data; zero is "field not set".
        let mut data: NOTIFYICONDATAW = unsafe { std::mem::zeroed() };
        data.cbSize = std::mem::size_of::<NOTIFYICONDATAW>() as u32;
        data.hWnd = hwnd(descriptor.window);
        data.uFlags = descriptor.flags.bits();
        data.uCallbackMessage = descriptor.callback_message;
        data.hIcon = descriptor
            .icon
            .map_or(ptr::null_mut(), |icon| icon.0 as HICON);
        data.szTip = *descriptor.tooltip.as_buffer();
        data.Anonymous.uVersion = descriptor.version;

        let message = match op {
            NotifyOp::Add => NIM_ADD,
            NotifyOp::Modify => NIM_MODIFY,
            NotifyOp::Delete => NIM_DELETE,
            NotifyOp::SetVersion => NIM_SETVERSION,
        };

        if unsafe { Shell_NotifyIconW(message, &data) } == 0 {
            return Err(last_error());
        }

        Ok(())
    }

    fn restart_message(&self) -> Option<NonZeroU32> {
        let id = *TASKBAR_CREATED.get_or_init(|| {
            let name = wide(OsStr::new("TaskbarCreated"));
            let id = unsafe { RegisterWindowMessageW(name.as_ptr()) };
            debug!(id, "Registered taskbar restart message");
            id
        });

        NonZeroU32::new(id)
    }
}

impl Icon<Win32Shell> {
    /// Load an `.ico`, `.bmp` or `.cur` file.
    #[track_caller]
    pub fn from_file(path: &Path) -> TrayResult<Self> {
        Self::load(Win32Shell, path)
    }
}

impl NotifyIcon<Win32Shell> {
    /// Add an icon with `tooltip` to the Windows notification area.
    #[track_caller]
    pub fn new(tooltip: &str, icon: Option<Icon<Win32Shell>>) -> TrayResult<Self> {
        Self::with_shell(Win32Shell, tooltip, icon)
    }
}

/// Pump messages for this thread until `WM_QUIT`; returns its exit code.
pub fn run_message_loop() -> i32 {
    // SAFETY: MSG is plain data.
    let mut msg: MSG = unsafe { std::mem::zeroed() };

    loop {
        match unsafe { GetMessageW(&mut msg, ptr::null_mut(), 0, 0) } {
            0 => return msg.wParam as i32,
            -1 => {
                warn!(code = last_error(), "GetMessageW failed");
                return -1;
            }
            _ => unsafe {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            },
        }
    }
}
