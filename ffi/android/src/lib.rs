#[macro_use]
extern crate log;
extern crate android_log;

use jni::objects::{JClass, JObject, JString, JThrowable, JValue};
use jni::sys::{jboolean, jobject, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;

use nfc_status::platform::{ApiLevel, DispatchError, NfcAdapter, Platform};
use nfc_status::NfcStatus;

const NULL: jobject = 0 as jobject;

/// Name the NFC system service is registered under (`Context.NFC_SERVICE`).
const NFC_SERVICE: &str = "nfc";

#[derive(thiserror::Error, Debug)]
enum Error {
    #[error("JNI Error: {0}")]
    Jni(#[from] jni::errors::Error),
}

#[derive(Copy, Clone)]
struct JniContext<'a> {
    env: JNIEnv<'a>,
    context: JObject<'a>,
}

/// Resolves platform facts through the JVM hosting this library.
struct JniPlatform;

/// Local reference to an `android.nfc.NfcAdapter` instance.
struct JniAdapter<'a> {
    adapter: JObject<'a>,
}

impl<'a> JniAdapter<'a> {
    fn into_object(self) -> JObject<'a> {
        self.adapter
    }
}

impl<'a> Platform<JniContext<'a>> for JniPlatform {
    type Adapter = JniAdapter<'a>;

    fn api_level(&self, ctx: JniContext<'a>) -> ApiLevel {
        match sdk_int(ctx) {
            Ok(level) => ApiLevel::new(level.max(0) as u32),
            Err(e) => {
                clear_pending_exception(ctx);
                error!("SDK_INT Error: {:?}", e);

                // level 0 is below every gate, so the queries fail safe
                ApiLevel::new(0)
            }
        }
    }

    fn default_adapter(&self, ctx: JniContext<'a>) -> Option<JniAdapter<'a>> {
        match default_adapter(ctx) {
            Ok(adapter) => adapter.map(|adapter| JniAdapter { adapter }),
            Err(e) => {
                clear_pending_exception(ctx);
                error!("getDefaultAdapter Error: {:?}", e);

                None
            }
        }
    }
}

impl<'a> NfcAdapter<JniContext<'a>> for JniAdapter<'a> {
    fn is_enabled(&self, ctx: JniContext<'a>) -> bool {
        let res = ctx
            .env
            .call_method(self.adapter, "isEnabled", "()Z", &[])
            .and_then(|value| value.z());

        match res {
            Ok(enabled) => enabled,
            Err(e) => {
                clear_pending_exception(ctx);
                error!("isEnabled Error: {:?}", e);

                false
            }
        }
    }

    fn call_bool(&self, ctx: JniContext<'a>, name: &str) -> Result<bool, DispatchError> {
        ctx.env
            .call_method(self.adapter, name, "()Z", &[])
            .and_then(|value| value.z())
            .map_err(|e| {
                let e = dispatch_error(ctx, name, e);
                debug!("{}", e);

                e
            })
    }
}

fn sdk_int(ctx: JniContext) -> Result<i32, Error> {
    Ok(ctx
        .env
        .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")?
        .i()?)
}

/// Asks the system service registry for the default NFC adapter.
/// Devices without an NFC module yield `None`.
fn default_adapter<'a>(ctx: JniContext<'a>) -> Result<Option<JObject<'a>>, Error> {
    let name = ctx.env.new_string(NFC_SERVICE)?;
    let manager = ctx
        .env
        .call_method(
            ctx.context,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(JObject::from(name))],
        )?
        .l()?;

    if manager.is_null() {
        return Ok(None);
    }

    let adapter = ctx
        .env
        .call_method(manager, "getDefaultAdapter", "()Landroid/nfc/NfcAdapter;", &[])?
        .l()?;

    Ok(match adapter.is_null() {
        true => None,
        false => Some(adapter),
    })
}

/// Maps a failed by-name call to the dispatch taxonomy, clearing any Java
/// exception the call left pending.
fn dispatch_error(ctx: JniContext, name: &str, err: jni::errors::Error) -> DispatchError {
    match err {
        jni::errors::Error::MethodNotFound { .. } => DispatchError::MethodNotFound(name.to_owned()),
        jni::errors::Error::JavaException => classify_exception(ctx, name),
        other => DispatchError::Invocation(name.to_owned(), other.to_string()),
    }
}

fn classify_exception(ctx: JniContext, name: &str) -> DispatchError {
    let throwable = match ctx.env.exception_occurred() {
        Ok(throwable) => throwable,
        Err(_) => {
            return DispatchError::Invocation(name.to_owned(), "unknown java exception".to_owned())
        }
    };

    // the JNI environment rejects most calls while an exception is pending
    let _ = ctx.env.exception_clear();

    if instance_of(ctx, throwable, "java/lang/NoSuchMethodError") {
        return DispatchError::MethodNotFound(name.to_owned());
    }

    if instance_of(ctx, throwable, "java/lang/IllegalAccessError") {
        return DispatchError::AccessDenied(name.to_owned());
    }

    DispatchError::Invocation(name.to_owned(), throwable_message(ctx, throwable))
}

fn instance_of(ctx: JniContext, throwable: JThrowable, class: &str) -> bool {
    ctx.env.is_instance_of(throwable, class).unwrap_or(false)
}

fn throwable_message(ctx: JniContext, throwable: JThrowable) -> String {
    ctx.env
        .call_method(throwable, "getMessage", "()Ljava/lang/String;", &[])
        .and_then(|value| value.l())
        .and_then(|message| ctx.env.get_string(JString::from(message)))
        .map(|message| message.into())
        .unwrap_or_else(|_| "unknown java exception".to_owned())
}

fn clear_pending_exception(ctx: JniContext) {
    if ctx.env.exception_check().unwrap_or(false) {
        let _ = ctx.env.exception_clear();
    }
}

fn jbool(value: bool) -> jboolean {
    match value {
        true => JNI_TRUE,
        false => JNI_FALSE,
    }
}

#[no_mangle]
pub extern "C" fn Java_dev_nfcstatus_ffi_LibNfcStatus_init() {
    android_log::init("NfcStatus").unwrap();
}

#[no_mangle]
pub extern "C" fn Java_dev_nfcstatus_ffi_LibNfcStatus_getNfcAdapter(
    env: JNIEnv,
    _class: JClass,
    context: JObject,
) -> jobject {
    let ctx = JniContext { env, context };

    match NfcStatus::new().adapter(ctx, &JniPlatform) {
        Some(adapter) => adapter.into_object().into_raw(),
        None => NULL,
    }
}

#[no_mangle]
pub extern "C" fn Java_dev_nfcstatus_ffi_LibNfcStatus_isNfcCapable(
    env: JNIEnv,
    _class: JClass,
    context: JObject,
) -> jboolean {
    let ctx = JniContext { env, context };

    jbool(NfcStatus::new().is_nfc_capable(ctx, &JniPlatform))
}

#[no_mangle]
pub extern "C" fn Java_dev_nfcstatus_ffi_LibNfcStatus_isNfcEnabled(
    env: JNIEnv,
    _class: JClass,
    context: JObject,
) -> jboolean {
    let ctx = JniContext { env, context };

    jbool(NfcStatus::new().is_nfc_enabled(ctx, &JniPlatform))
}

#[no_mangle]
pub extern "C" fn Java_dev_nfcstatus_ffi_LibNfcStatus_isAndroidBeamEnabled(
    env: JNIEnv,
    _class: JClass,
    context: JObject,
) -> jboolean {
    let ctx = JniContext { env, context };

    jbool(NfcStatus::new().is_android_beam_enabled(ctx, &JniPlatform))
}
