use std::ops::Range;
use std::sync::Arc;

use wapc::{wapc_functions, ModuleState, HOST_NAMESPACE};
use wasmtime::{format_err, AsContext, AsContextMut, Caller, Extern, Linker, Memory};

use crate::errors::{Error, Result};
use crate::store::UnitStore;

/// Registers every waPC host function under the `wapc` namespace
pub(crate) fn add_to_linker(linker: &mut Linker<UnitStore>) -> Result<()> {
  register_guest_request_func(linker)?;
  register_console_log_func(linker)?;
  register_host_call_func(linker)?;
  register_host_response_func(linker)?;
  register_host_response_len_func(linker)?;
  register_guest_response_func(linker)?;
  register_guest_error_func(linker)?;
  register_host_error_func(linker)?;
  register_host_error_len_func(linker)?;

  Ok(())
}

fn func_def_error(func: &str, err: impl std::fmt::Display) -> Error {
  Error::LinkerFuncDef {
    func: format!("{}.{}", HOST_NAMESPACE, func),
    err: err.to_string(),
  }
}

fn register_guest_request_func(linker: &mut Linker<UnitStore>) -> Result<()> {
  linker
    .func_wrap(
      HOST_NAMESPACE,
      wapc_functions::GUEST_REQUEST_FN,
      |mut caller: Caller<'_, UnitStore>, op_ptr: i32, ptr: i32| -> wasmtime::Result<()> {
        let host = host_state(&caller)?;
        let memory = caller_memory(&mut caller)?;
        if let Some(inv) = host.get_guest_request() {
          write_guest_bytes(&mut caller, memory, ptr, &inv.msg)?;
          write_guest_bytes(&mut caller, memory, op_ptr, inv.operation.as_bytes())?;
        }
        Ok(())
      },
    )
    .map_err(|e| func_def_error(wapc_functions::GUEST_REQUEST_FN, e))?;
  Ok(())
}

fn register_console_log_func(linker: &mut Linker<UnitStore>) -> Result<()> {
  linker
    .func_wrap(
      HOST_NAMESPACE,
      wapc_functions::HOST_CONSOLE_LOG,
      |mut caller: Caller<'_, UnitStore>, ptr: i32, len: i32| -> wasmtime::Result<()> {
        let memory = caller_memory(&mut caller)?;
        let vec = read_guest_bytes(&caller, memory, ptr, len)?;
        let msg =
          std::str::from_utf8(&vec).map_err(|e| format_err!("console_log: cannot convert message to UTF8: {:?}", e))?;

        (caller.data().console)(msg);
        Ok(())
      },
    )
    .map_err(|e| func_def_error(wapc_functions::HOST_CONSOLE_LOG, e))?;
  Ok(())
}

fn register_host_call_func(linker: &mut Linker<UnitStore>) -> Result<()> {
  linker
    .func_wrap(
      HOST_NAMESPACE,
      wapc_functions::HOST_CALL,
      |mut caller: Caller<'_, UnitStore>,
       bd_ptr: i32,
       bd_len: i32,
       ns_ptr: i32,
       ns_len: i32,
       op_ptr: i32,
       op_len: i32,
       ptr: i32,
       len: i32|
       -> wasmtime::Result<i32> {
        let host = host_state(&caller)?;
        let memory = caller_memory(&mut caller)?;

        let payload = read_guest_bytes(&caller, memory, ptr, len)?;
        let bd = read_guest_str(&caller, memory, bd_ptr, bd_len, "binding")?;
        let ns = read_guest_str(&caller, memory, ns_ptr, ns_len, "namespace")?;
        let op = read_guest_str(&caller, memory, op_ptr, op_len, "operation")?;

        let result = host.do_host_call(&bd, &ns, &op, &payload);
        Ok(result.unwrap_or(0))
      },
    )
    .map_err(|e| func_def_error(wapc_functions::HOST_CALL, e))?;
  Ok(())
}

fn register_host_response_func(linker: &mut Linker<UnitStore>) -> Result<()> {
  linker
    .func_wrap(
      HOST_NAMESPACE,
      wapc_functions::HOST_RESPONSE_FN,
      |mut caller: Caller<'_, UnitStore>, ptr: i32| -> wasmtime::Result<()> {
        let host = host_state(&caller)?;
        let memory = caller_memory(&mut caller)?;
        if let Some(ref response) = host.get_host_response() {
          write_guest_bytes(&mut caller, memory, ptr, response)?;
        }
        Ok(())
      },
    )
    .map_err(|e| func_def_error(wapc_functions::HOST_RESPONSE_FN, e))?;
  Ok(())
}

fn register_host_response_len_func(linker: &mut Linker<UnitStore>) -> Result<()> {
  linker
    .func_wrap(
      HOST_NAMESPACE,
      wapc_functions::HOST_RESPONSE_LEN_FN,
      |caller: Caller<'_, UnitStore>| -> wasmtime::Result<i32> {
        let host = host_state(&caller)?;
        let len = host.get_host_response().map_or(0, |r| r.len());
        guest_len(len)
      },
    )
    .map_err(|e| func_def_error(wapc_functions::HOST_RESPONSE_LEN_FN, e))?;
  Ok(())
}

fn register_guest_response_func(linker: &mut Linker<UnitStore>) -> Result<()> {
  linker
    .func_wrap(
      HOST_NAMESPACE,
      wapc_functions::GUEST_RESPONSE_FN,
      |mut caller: Caller<'_, UnitStore>, ptr: i32, len: i32| -> wasmtime::Result<()> {
        let host = host_state(&caller)?;
        let memory = caller_memory(&mut caller)?;
        let vec = read_guest_bytes(&caller, memory, ptr, len)?;
        host.set_guest_response(vec);
        Ok(())
      },
    )
    .map_err(|e| func_def_error(wapc_functions::GUEST_RESPONSE_FN, e))?;
  Ok(())
}

fn register_guest_error_func(linker: &mut Linker<UnitStore>) -> Result<()> {
  linker
    .func_wrap(
      HOST_NAMESPACE,
      wapc_functions::GUEST_ERROR_FN,
      |mut caller: Caller<'_, UnitStore>, ptr: i32, len: i32| -> wasmtime::Result<()> {
        let host = host_state(&caller)?;
        let memory = caller_memory(&mut caller)?;
        let guest_err_msg = read_guest_str(&caller, memory, ptr, len, "guest error")?;
        host.set_guest_error(guest_err_msg);
        Ok(())
      },
    )
    .map_err(|e| func_def_error(wapc_functions::GUEST_ERROR_FN, e))?;
  Ok(())
}

fn register_host_error_func(linker: &mut Linker<UnitStore>) -> Result<()> {
  linker
    .func_wrap(
      HOST_NAMESPACE,
      wapc_functions::HOST_ERROR_FN,
      |mut caller: Caller<'_, UnitStore>, ptr: i32| -> wasmtime::Result<()> {
        let host = host_state(&caller)?;
        let memory = caller_memory(&mut caller)?;
        if let Some(ref e) = host.get_host_error() {
          write_guest_bytes(&mut caller, memory, ptr, e.as_bytes())?;
        }
        Ok(())
      },
    )
    .map_err(|e| func_def_error(wapc_functions::HOST_ERROR_FN, e))?;
  Ok(())
}

fn register_host_error_len_func(linker: &mut Linker<UnitStore>) -> Result<()> {
  linker
    .func_wrap(
      HOST_NAMESPACE,
      wapc_functions::HOST_ERROR_LEN_FN,
      |caller: Caller<'_, UnitStore>| -> wasmtime::Result<i32> {
        let host = host_state(&caller)?;
        let len = host.get_host_error().map_or(0, |e| e.len());
        guest_len(len)
      },
    )
    .map_err(|e| func_def_error(wapc_functions::HOST_ERROR_LEN_FN, e))?;
  Ok(())
}

fn host_state(caller: &Caller<'_, UnitStore>) -> wasmtime::Result<Arc<ModuleState>> {
  caller
    .data()
    .host
    .clone()
    .ok_or_else(|| format_err!("host should have been set during the init"))
}

fn caller_memory(caller: &mut Caller<'_, UnitStore>) -> wasmtime::Result<Memory> {
  caller
    .get_export("memory")
    .and_then(Extern::into_memory)
    .ok_or_else(|| format_err!("guest module does not export a 'memory' instance"))
}

fn guest_offset(value: i32) -> wasmtime::Result<usize> {
  usize::try_from(value).map_err(|_| format_err!("negative guest memory offset or length: {}", value))
}

fn guest_len(len: usize) -> wasmtime::Result<i32> {
  i32::try_from(len).map_err(|_| format_err!("{} bytes do not fit in guest memory", len))
}

fn guest_range(ptr: i32, len: i32) -> wasmtime::Result<Range<usize>> {
  let start = guest_offset(ptr)?;
  let end = start
    .checked_add(guest_offset(len)?)
    .ok_or_else(|| format_err!("guest memory range overflows: {} bytes at {}", len, ptr))?;
  Ok(start..end)
}

fn read_guest_bytes(caller: &Caller<'_, UnitStore>, memory: Memory, ptr: i32, len: i32) -> wasmtime::Result<Vec<u8>> {
  let range = guest_range(ptr, len)?;
  memory
    .data(caller.as_context())
    .get(range)
    .map(<[u8]>::to_vec)
    .ok_or_else(|| format_err!("guest memory read out of bounds: {} bytes at {}", len, ptr))
}

fn read_guest_str(
  caller: &Caller<'_, UnitStore>,
  memory: Memory,
  ptr: i32,
  len: i32,
  what: &str,
) -> wasmtime::Result<String> {
  let vec = read_guest_bytes(caller, memory, ptr, len)?;
  String::from_utf8(vec).map_err(|e| format_err!("cannot convert {} to UTF8: {:?}", what, e))
}

fn write_guest_bytes(caller: &mut Caller<'_, UnitStore>, memory: Memory, ptr: i32, bytes: &[u8]) -> wasmtime::Result<()> {
  let offset = guest_offset(ptr)?;
  memory
    .write(caller.as_context_mut(), offset, bytes)
    .map_err(|e| format_err!("guest memory write failed at {}: {}", ptr, e))
}

#[cfg(test)]
mod tests {
  use super::{guest_len, guest_range};

  #[test]
  fn guest_range_rejects_negative_values() {
    assert!(guest_range(-1, 4).is_err());
    assert!(guest_range(0, -4).is_err());
    assert_eq!(guest_range(16, 4).unwrap(), 16..20);
  }

  #[test]
  fn guest_len_reports_oversized_buffers() {
    assert_eq!(guest_len(12).unwrap(), 12);
    let err = guest_len(usize::MAX).unwrap_err();
    assert!(err.to_string().contains("do not fit in guest memory"));
  }
}
