use serde_json::Value;

use crate::error::Result;
use crate::schema::{DocumentReader, DocumentWriter, Extensions, tables};

/// One end of a slider arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderEnd {
    pub time: f64,
    pub line_index: i32,
    pub line_layer: i32,
    pub control_point_length_multiplier: f64,
    pub cut_direction: i32,
}

/// Arc connecting a head note to a tail note.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub color_type: i32,
    pub head: SliderEnd,
    pub tail: SliderEnd,
    pub mid_anchor_mode: i32,
    pub extensions: Extensions,
}

impl Slider {
    pub fn decode(doc: &Value) -> Result<Self> {
        let r = DocumentReader::new(&tables::SLIDER, doc)?;
        Ok(Self {
            color_type: r.small_int("colorType")?,
            head: SliderEnd {
                time: r.float("headTime")?,
                line_index: r.small_int("headLineIndex")?,
                line_layer: r.small_int("headLineLayer")?,
                control_point_length_multiplier: r.float("headControlPointLengthMultiplier")?,
                cut_direction: r.small_int("headCutDirection")?,
            },
            tail: SliderEnd {
                time: r.float("tailTime")?,
                line_index: r.small_int("tailLineIndex")?,
                line_layer: r.small_int("tailLineLayer")?,
                control_point_length_multiplier: r.float("tailControlPointLengthMultiplier")?,
                cut_direction: r.small_int("tailCutDirection")?,
            },
            mid_anchor_mode: r.small_int("sliderMidAnchorMode")?,
            extensions: r.extensions()?,
        })
    }

    pub fn encode(&self) -> Result<Value> {
        let mut w = DocumentWriter::new(&tables::SLIDER);
        w.put("colorType", self.color_type)
            .put_float("headTime", self.head.time)
            .put("headLineIndex", self.head.line_index)
            .put("headLineLayer", self.head.line_layer)
            .put_float(
                "headControlPointLengthMultiplier",
                self.head.control_point_length_multiplier,
            )
            .put("headCutDirection", self.head.cut_direction)
            .put_float("tailTime", self.tail.time)
            .put("tailLineIndex", self.tail.line_index)
            .put("tailLineLayer", self.tail.line_layer)
            .put_float(
                "tailControlPointLengthMultiplier",
                self.tail.control_point_length_multiplier,
            )
            .put("tailCutDirection", self.tail.cut_direction)
            .put("sliderMidAnchorMode", self.mid_anchor_mode);
        w.finish(&self.extensions)
    }

    /// Length of the arc in beats.
    pub fn duration(&self) -> f64 {
        self.tail.time - self.head.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn slider_doc() -> Value {
        json!({
            "_colorType": 0,
            "_headTime": 8,
            "_headLineIndex": 1,
            "_headLineLayer": 0,
            "_headControlPointLengthMultiplier": 1,
            "_headCutDirection": 1,
            "_tailTime": 10,
            "_tailLineIndex": 2,
            "_tailLineLayer": 2,
            "_tailControlPointLengthMultiplier": 0.5,
            "_tailCutDirection": 0,
            "_sliderMidAnchorMode": 0
        })
    }

    #[test]
    fn test_decode_slider() {
        let slider = Slider::decode(&slider_doc()).unwrap();
        assert_eq!(slider.head.line_index, 1);
        assert_eq!(slider.tail.line_layer, 2);
        assert_eq!(slider.tail.control_point_length_multiplier, 0.5);
        assert_eq!(slider.duration(), 2.0);
        assert!(slider.extensions.is_empty());
    }

    #[test]
    fn test_slider_fields_are_all_required() {
        let mut doc = slider_doc();
        doc.as_object_mut().unwrap().remove("_tailCutDirection");
        let err = Slider::decode(&doc).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField {
                entity: "Slider",
                field: "tailCutDirection"
            }
        ));
    }

    #[test]
    fn test_encode_round_trips_document() {
        let doc = slider_doc();
        assert_eq!(Slider::decode(&doc).unwrap().encode().unwrap(), doc);
    }
}
