//! Фрейминг сообщений: `[длина: 1 байт][payload]`.
//!
//! Обмен идёт одним `read`/`write` на соединение, без сборки потока.
//! Префикс длины нужен только чтобы отличить целое сообщение от
//! обрезанного: если байт длины не сошёлся с фактом — сообщение
//! повреждено и не обрабатывается.

use crate::error::FrameError;

/// Максимальный payload: байт длины плюс payload, значения 255 и
/// выше в один байт не кодируются.
pub const MAX_PAYLOAD: usize = 254;

/// Кодирует payload, приписывая однобайтовый префикс длины.
///
/// Payload длиннее [`MAX_PAYLOAD`] отклоняется ошибкой
/// [`FrameError::TooLarge`]; расширения префикса нет, вызывающий
/// обязан сообщить про "message too large" сам.
pub fn encode(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::TooLarge(payload.len()));
    }

    let mut out = Vec::with_capacity(payload.len() + 1);
    out.push(payload.len() as u8);
    out.extend_from_slice(payload);
    Ok(out)
}

/// Снимает префикс длины и возвращает payload.
///
/// Расхождение заявленной и фактической длины — это повреждённое
/// (обычно обрезанное) сообщение: [`FrameError::LengthMismatch`],
/// никогда не паника.
pub fn decode(buf: &[u8]) -> Result<&[u8], FrameError> {
    let (&declared, payload) = buf.split_first().ok_or(FrameError::Empty)?;

    if payload.len() != declared as usize {
        return Err(FrameError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    Ok(payload)
}
